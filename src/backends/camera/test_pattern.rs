// SPDX-License-Identifier: GPL-3.0-only

//! Deterministic test-pattern camera backend
//!
//! Generates synthetic frames at the configured framerate. The pattern is
//! asymmetric on both axes so mirror and crop-centering behavior can be
//! verified from pixel values:
//!
//! - left half: red, right half: blue (horizontal asymmetry)
//! - top quarter carries a brighter tint (vertical asymmetry)
//! - a gray scanline advances with the frame index, so consecutive frames
//!   differ
//!
//! Colors are flat blocks, which survive JPEG round-trips well enough for
//! tests to sample them.

use super::{CameraBackend, CameraStream};
use crate::backends::camera::types::{
    CameraFrame, CaptureFormat, FacingMode, PermissionState, PixelFormat,
};
use crate::errors::CameraError;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Red used for the left half of the pattern
pub const LEFT_COLOR: [u8; 3] = [200, 40, 40];

/// Blue used for the right half of the pattern
pub const RIGHT_COLOR: [u8; 3] = [40, 40, 200];

/// Synthetic camera backend
///
/// Availability and permission are configurable so error paths can be
/// exercised without real hardware.
#[derive(Debug, Clone)]
pub struct TestPatternCamera {
    permission: PermissionState,
    available: bool,
}

impl Default for TestPatternCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPatternCamera {
    /// A granted, available camera
    pub fn new() -> Self {
        Self {
            permission: PermissionState::Granted,
            available: true,
        }
    }

    /// Simulate a platform permission state
    pub fn with_permission(mut self, permission: PermissionState) -> Self {
        self.permission = permission;
        self
    }

    /// Simulate a machine without a camera
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

impl CameraBackend for TestPatternCamera {
    fn name(&self) -> &'static str {
        "test-pattern"
    }

    async fn permission(&self) -> PermissionState {
        self.permission
    }

    async fn open(
        &self,
        facing: FacingMode,
        format: &CaptureFormat,
    ) -> Result<CameraStream, CameraError> {
        if !self.available {
            return Err(CameraError::DeviceUnavailable(
                "no camera device present".to_string(),
            ));
        }
        if format.width == 0 || format.height == 0 || format.framerate == 0 {
            return Err(CameraError::FormatNotSupported(format.to_string()));
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let format = *format;
        let period = format.frame_period();

        let frames = Box::pin(async_stream::stream! {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut index: u64 = 0;
            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => {
                        debug!(frames = index, "Test pattern stream stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        yield render_test_frame(&format, index);
                        index += 1;
                    }
                }
            }
        });

        Ok(CameraStream::new(facing, format, frames, stop_tx))
    }
}

/// Render a single test-pattern frame
pub fn render_test_frame(format: &CaptureFormat, index: u64) -> CameraFrame {
    let (width, height) = (format.width, format.height);
    let mut data = vec![0u8; (width * height * 4) as usize];
    let scanline = (index * 4) % height as u64;

    for y in 0..height {
        for x in 0..width {
            let base = if x < width / 2 { LEFT_COLOR } else { RIGHT_COLOR };
            let mut px = base;
            if y < height / 4 {
                // Brighter band across the top quarter
                for c in &mut px {
                    *c = c.saturating_add(40);
                }
            }
            if y as u64 == scanline {
                px = [128, 128, 128];
            }
            let offset = ((y * width + x) * 4) as usize;
            data[offset] = px[0];
            data[offset + 1] = px[1];
            data[offset + 2] = px[2];
            data[offset + 3] = 255;
        }
    }

    let timestamp = Duration::from_secs_f64(index as f64 / format.framerate.max(1) as f64);
    CameraFrame::from_raw(width, height, PixelFormat::Rgba, timestamp, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format() -> CaptureFormat {
        CaptureFormat {
            width: 64,
            height: 48,
            framerate: 30,
        }
    }

    #[test]
    fn test_frame_dimensions_and_stride() {
        let frame = render_test_frame(&format(), 0);
        assert_eq!(frame.width, 64);
        assert_eq!(frame.height, 48);
        assert_eq!(frame.stride, 64 * 4);
        assert_eq!(frame.data.len(), 64 * 48 * 4);
    }

    #[test]
    fn test_pattern_is_horizontally_asymmetric() {
        let frame = render_test_frame(&format(), 1);
        let left = frame.pixel(10, 24);
        let right = frame.pixel(54, 24);
        assert_eq!(&left[..3], &LEFT_COLOR);
        assert_eq!(&right[..3], &RIGHT_COLOR);
    }

    #[test]
    fn test_pattern_is_vertically_asymmetric() {
        let frame = render_test_frame(&format(), 1);
        let top = frame.pixel(10, 2);
        let bottom = frame.pixel(10, 40);
        assert!(top[0] > bottom[0]);
    }

    #[test]
    fn test_consecutive_frames_differ() {
        let a = render_test_frame(&format(), 0);
        let b = render_test_frame(&format(), 1);
        assert_ne!(a.data, b.data);
        assert!(b.timestamp > a.timestamp);
    }

    #[test]
    fn test_timestamps_follow_framerate() {
        let frame = render_test_frame(&format(), 30);
        assert_eq!(frame.timestamp, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_delivers_frames_in_order() {
        let backend = TestPatternCamera::new();
        let mut stream = backend
            .open(FacingMode::User, &format())
            .await
            .expect("stream should open");

        let first = stream.next_frame().await.expect("first frame");
        let second = stream.next_frame().await.expect("second frame");
        assert!(second.timestamp > first.timestamp);

        stream.stop();
        assert!(stream.next_frame().await.is_err());
    }

    #[tokio::test]
    async fn test_unavailable_backend_errors() {
        let backend = TestPatternCamera::new().unavailable();
        let result = backend.open(FacingMode::User, &format()).await;
        assert!(matches!(result, Err(CameraError::DeviceUnavailable(_))));
    }
}
