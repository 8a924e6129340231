// SPDX-License-Identifier: GPL-3.0-only

//! Local file input boundary
//!
//! User-selected files are an alternate asset source feeding the same
//! square-crop normalization as the camera paths. Images are decoded to a
//! single frame; clips are parsed from motion-JPEG streams. Neither path
//! is camera-specific, so file-sourced media is never mirrored.

use crate::backends::camera::types::{CameraFrame, PixelFormat};
use crate::constants::file_formats;
use crate::errors::CameraError;
use crate::media::VideoClip;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// What a selected file contains
#[derive(Debug)]
pub enum SelectedMedia {
    /// A single decoded image frame
    Image(CameraFrame),
    /// A parsed clip
    Video(VideoClip),
}

/// Load a user-selected file as capture input
///
/// Classification is by extension, matching the file picker's filter.
///
/// # Errors
///
/// `CameraError::FormatNotSupported` for unrecognized extensions,
/// `CameraError::DeviceUnavailable` if the file cannot be read or decoded.
pub fn load_media(path: &Path, clip_framerate: u32) -> Result<SelectedMedia, CameraError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if file_formats::is_image_extension(&extension) {
        load_image_as_frame(path).map(SelectedMedia::Image)
    } else if file_formats::is_video_extension(&extension) {
        load_clip(path, clip_framerate).map(SelectedMedia::Video)
    } else {
        Err(CameraError::FormatNotSupported(format!(
            "unsupported file format: {}",
            extension
        )))
    }
}

/// Load an image file and convert it to a frame
///
/// Supports the formats the `image` crate decodes: PNG, JPEG, GIF, BMP,
/// WebP, TIFF.
pub fn load_image_as_frame(path: &Path) -> Result<CameraFrame, CameraError> {
    info!(path = %path.display(), "Loading image file");

    let img = image::open(path).map_err(|e| {
        CameraError::DeviceUnavailable(format!(
            "failed to load image '{}': {}",
            path.display(),
            e
        ))
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    info!(width, height, "Image loaded");

    Ok(CameraFrame::from_raw(
        width,
        height,
        PixelFormat::Rgba,
        Duration::ZERO,
        rgba.into_raw(),
    ))
}

/// Load a motion-JPEG clip file
pub fn load_clip(path: &Path, framerate: u32) -> Result<VideoClip, CameraError> {
    info!(path = %path.display(), "Loading clip file");

    let bytes = std::fs::read(path).map_err(|e| {
        CameraError::DeviceUnavailable(format!(
            "failed to read clip '{}': {}",
            path.display(),
            e
        ))
    })?;

    let clip = VideoClip::from_mjpeg(&bytes, framerate)
        .map_err(|e| CameraError::DeviceUnavailable(e.to_string()))?;

    info!(
        frames = clip.len(),
        duration_ms = clip.duration().as_millis() as u64,
        "Clip loaded"
    );
    Ok(clip)
}
