// SPDX-License-Identifier: MPL-2.0

//! Still image encoding

use crate::backends::camera::types::CameraFrame;
use crate::constants::QualityPreset;
use crate::errors::PhotoError;
use crate::media::codec;
use serde::{Deserialize, Serialize};

/// Output encoding for still images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingFormat {
    /// PNG - lossless (default)
    #[default]
    Png,
    /// JPEG - lossy, smaller files
    Jpeg,
}

impl EncodingFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Png => "png",
            EncodingFormat::Jpeg => "jpg",
        }
    }
}

/// An encoded still image ready for storage
#[derive(Debug, Clone)]
pub struct EncodedStill {
    pub data: Vec<u8>,
    pub format: EncodingFormat,
    pub square_size: u32,
}

/// Encode a processed square frame as a still image
pub fn encode_still(
    frame: &CameraFrame,
    format: EncodingFormat,
    quality: QualityPreset,
) -> Result<EncodedStill, PhotoError> {
    let data = match format {
        EncodingFormat::Png => codec::encode_png(frame)?,
        EncodingFormat::Jpeg => codec::encode_jpeg(frame, quality.jpeg_quality())?,
    };
    Ok(EncodedStill {
        data,
        format,
        square_size: frame.width,
    })
}
