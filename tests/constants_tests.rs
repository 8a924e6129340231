// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use locket_capture::constants::{
    self, HOLD_THRESHOLD, QualityPreset, RECORDING_CEILING, file_formats,
};

#[test]
fn test_quality_preset_values() {
    // All presets exist (Low, Medium, High)
    assert_eq!(QualityPreset::ALL.len(), 3);
}

#[test]
fn test_quality_preset_ordering() {
    // Presets are ordered from lowest to highest quality
    let mut prev_quality = 0u8;
    for preset in QualityPreset::ALL {
        let quality = preset.jpeg_quality();
        assert!(
            quality > prev_quality,
            "Presets should be ordered from lowest to highest"
        );
        prev_quality = quality;
    }
}

#[test]
fn test_quality_preset_display_names() {
    for preset in QualityPreset::ALL {
        let name = preset.display_name();
        assert!(!name.is_empty(), "Preset {:?} has empty display name", preset);
    }
}

#[test]
fn test_hold_threshold_below_ceiling() {
    assert!(HOLD_THRESHOLD < RECORDING_CEILING);
}

#[test]
fn test_file_format_classification() {
    assert!(file_formats::is_image_extension("png"));
    assert!(file_formats::is_image_extension("jpeg"));
    assert!(file_formats::is_video_extension("mjpeg"));
    assert!(!file_formats::is_image_extension("mjpeg"));
    assert!(!file_formats::is_video_extension("png"));
    assert!(!file_formats::is_image_extension("pdf"));
}

#[test]
fn test_suggested_gradients_are_hex_pairs() {
    for (top, bottom) in constants::gradients::SUGGESTED {
        for color in [top, bottom] {
            assert!(color.starts_with('#') && color.len() == 7, "bad color {}", color);
        }
    }
}
