// SPDX-License-Identifier: MPL-2.0

//! Square-crop and mirror geometry
//!
//! Every produced asset is a centered square crop of its source frame, with
//! side `min(width, height)`. Front-camera output is additionally mirrored
//! horizontally so captures match the preview. Both operations happen in a
//! single copy pass over the pixel data.

use crate::backends::camera::types::CameraFrame;
use std::time::Instant;

/// A centered crop rectangle within a source frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// Compute the centered square crop for a source of the given dimensions
///
/// The square side is `min(width, height)`; the crop is centered on the
/// longer dimension (offsets round down for odd remainders).
pub fn centered_square(width: u32, height: u32) -> CropRect {
    let size = width.min(height);
    CropRect {
        x: (width - size) / 2,
        y: (height - size) / 2,
        size,
    }
}

/// Produce the centered square crop of a frame, optionally mirrored
///
/// The output frame keeps the source pixel format and presentation
/// timestamp; its stride is tightly packed.
pub fn square_crop(frame: &CameraFrame, mirror: bool) -> CameraFrame {
    let rect = centered_square(frame.width, frame.height);
    let bpp = frame.format.bytes_per_pixel() as usize;
    let src_stride = frame.stride as usize;
    let size = rect.size as usize;

    let mut out = vec![0u8; size * size * bpp];
    for y in 0..size {
        let src_row = (y + rect.y as usize) * src_stride;
        let dst_row = y * size * bpp;
        for x in 0..size {
            let src_x = if mirror {
                rect.x as usize + (size - 1 - x)
            } else {
                rect.x as usize + x
            };
            let src = src_row + src_x * bpp;
            let dst = dst_row + x * bpp;
            out[dst..dst + bpp].copy_from_slice(&frame.data[src..src + bpp]);
        }
    }

    CameraFrame {
        width: rect.size,
        height: rect.size,
        data: out.into_boxed_slice().into(),
        format: frame.format,
        stride: rect.size * frame.format.bytes_per_pixel(),
        captured_at: Instant::now(),
        timestamp: frame.timestamp,
    }
}
