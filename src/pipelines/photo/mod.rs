// SPDX-License-Identifier: MPL-2.0

//! Still capture pipeline
//!
//! Turns a raw camera frame into an encoded square still:
//! centered square crop, optional horizontal mirror (front camera),
//! then PNG/JPEG encoding.

pub mod encoding;
pub mod transform;

pub use encoding::{EncodedStill, EncodingFormat};

use crate::backends::camera::types::CameraFrame;
use crate::constants::QualityPreset;
use crate::errors::PhotoError;
use tracing::debug;

/// Still capture pipeline configuration
#[derive(Debug, Clone, Copy)]
pub struct PhotoPipeline {
    format: EncodingFormat,
    quality: QualityPreset,
}

impl Default for PhotoPipeline {
    fn default() -> Self {
        Self {
            format: EncodingFormat::default(),
            quality: QualityPreset::default(),
        }
    }
}

impl PhotoPipeline {
    /// Pipeline with explicit output format and quality
    pub fn new(format: EncodingFormat, quality: QualityPreset) -> Self {
        Self { format, quality }
    }

    /// Crop, optionally mirror, and encode a frame
    pub fn process(&self, frame: &CameraFrame, mirror: bool) -> Result<EncodedStill, PhotoError> {
        let square = transform::square_crop(frame, mirror);
        debug!(
            source_width = frame.width,
            source_height = frame.height,
            square_size = square.width,
            mirror,
            "Processed still frame"
        );
        encoding::encode_still(&square, self.format, self.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::test_pattern::render_test_frame;
    use crate::backends::camera::types::CaptureFormat;

    #[test]
    fn test_process_produces_square_still() {
        let fmt = CaptureFormat {
            width: 96,
            height: 48,
            framerate: 30,
        };
        let frame = render_test_frame(&fmt, 0);
        let still = PhotoPipeline::default()
            .process(&frame, true)
            .expect("process");
        assert_eq!(still.square_size, 48);
    }
}
