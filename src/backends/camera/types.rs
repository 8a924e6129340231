// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::Stream;

/// Which physical camera supplies the video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FacingMode {
    /// User-facing (front, "selfie") camera
    #[default]
    User,
    /// Environment-facing (rear) camera
    Environment,
}

impl FacingMode {
    /// The other facing mode
    pub fn flipped(&self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }

    /// Front-camera output is horizontally mirrored so captures match
    /// what the user saw in preview.
    pub fn is_mirrored(&self) -> bool {
        matches!(self, FacingMode::User)
    }
}

impl std::fmt::Display for FacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacingMode::User => write!(f, "front"),
            FacingMode::Environment => write!(f, "rear"),
        }
    }
}

impl std::str::FromStr for FacingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" | "front" => Ok(FacingMode::User),
            "environment" | "rear" | "back" => Ok(FacingMode::Environment),
            other => Err(format!("unknown facing mode '{}'", other)),
        }
    }
}

/// Permission state reported by the device capability boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Access granted
    Granted,
    /// Access denied by the platform or user
    Denied,
    /// Not yet decided; acquisition may prompt
    Prompt,
}

/// Pixel format for camera frames
///
/// The synthetic backend produces RGBA; decoded JPEG chunks come back as
/// RGB24. Both flow through the same crop/mirror transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// RGBA - 32-bit with alpha (4 bytes per pixel)
    Rgba,
    /// RGB - 24-bit without alpha (3 bytes per pixel)
    Rgb24,
}

impl PixelFormat {
    /// Bytes per pixel for this format
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::Rgba => 4,
            PixelFormat::Rgb24 => 3,
        }
    }
}

/// Camera capture format specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureFormat {
    pub width: u32,
    pub height: u32,
    pub framerate: u32,
}

impl Default for CaptureFormat {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_FRAME_WIDTH,
            height: crate::constants::DEFAULT_FRAME_HEIGHT,
            framerate: crate::constants::DEFAULT_FRAMERATE,
        }
    }
}

impl CaptureFormat {
    /// Period between frames at this format's framerate
    pub fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.framerate.max(1) as f64)
    }
}

impl std::fmt::Display for CaptureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} @ {}fps", self.width, self.height, self.framerate)
    }
}

/// A single frame from the camera
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Raw pixel data
    pub data: Arc<[u8]>,
    /// Pixel format of the data
    pub format: PixelFormat,
    /// Row stride in bytes (may include padding)
    pub stride: u32,
    /// Timestamp when the frame was captured (for latency diagnostics)
    pub captured_at: Instant,
    /// Presentation time since stream start
    pub timestamp: Duration,
}

impl CameraFrame {
    /// Build a tightly-packed frame from raw pixel bytes
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        timestamp: Duration,
        data: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            data: Arc::from(data.into_boxed_slice()),
            format,
            stride: width * format.bytes_per_pixel(),
            captured_at: Instant::now(),
            timestamp,
        }
    }

    /// Pixel bytes at (x, y); length equals the format's bytes-per-pixel
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let bpp = self.format.bytes_per_pixel() as usize;
        let offset = y as usize * self.stride as usize + x as usize * bpp;
        &self.data[offset..offset + bpp]
    }
}

/// Stream of frames delivered by a backend
pub type FrameStream = Pin<Box<dyn Stream<Item = CameraFrame> + Send>>;
