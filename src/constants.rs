// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum press duration distinguishing a video-record gesture from a
/// tap-to-photo gesture.
pub const HOLD_THRESHOLD: Duration = Duration::from_millis(1_000);

/// Maximum allowed recording duration, enforced regardless of user input.
///
/// The recorder auto-stops here even without release to bound resource use.
pub const RECORDING_CEILING: Duration = Duration::from_millis(10_000);

/// Default capture width in pixels
pub const DEFAULT_FRAME_WIDTH: u32 = 640;

/// Default capture height in pixels
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

/// Default capture framerate
pub const DEFAULT_FRAMERATE: u32 = 30;

/// Still/clip encode quality presets
///
/// These presets define the JPEG quality used when encoding captured frames.
/// Users can choose between quality and file size trade-offs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QualityPreset {
    /// Low quality - smaller files
    Low,
    /// Medium quality - balanced (default)
    #[default]
    Medium,
    /// High quality - larger files
    High,
}

impl QualityPreset {
    /// Get all preset variants for UI iteration
    pub const ALL: [QualityPreset; 3] =
        [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High];

    /// Get display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// JPEG quality factor (1-100) for this preset
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 80,
            QualityPreset::High => 92,
        }
    }
}

/// File format helpers for the local-file input boundary
pub mod file_formats {
    /// Check if an extension names a supported still image format
    pub fn is_image_extension(ext: &str) -> bool {
        matches!(
            ext,
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tiff"
        )
    }

    /// Check if an extension names a supported clip format
    ///
    /// Clips are stored as concatenated-JFIF motion JPEG; no container
    /// formats requiring a native codec stack are accepted.
    pub fn is_video_extension(ext: &str) -> bool {
        matches!(ext, "mjpeg" | "mjpg")
    }
}

/// Suggested theme gradients offered by the customize sheet
pub mod gradients {
    /// (top, bottom) CSS-style hex color pairs
    pub const SUGGESTED: [(&str, &str); 6] = [
        ("#5733FF", "#FF33B5"),
        ("#FF5733", "#FFC300"),
        ("#33FF57", "#33CFFF"),
        ("#FF5733", "#33FFC3"),
        ("#FF9500", "#FF2D95"),
        ("#00B5FF", "#FFB6C1"),
    ];
}
