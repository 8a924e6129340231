// SPDX-License-Identifier: MPL-2.0

//! Frame encode/decode built on the `image` crate
//!
//! Stills are encoded as PNG or JPEG; clip chunks are always JPEG so a
//! finalized clip is a plain concatenated-JFIF motion-JPEG stream.

use crate::backends::camera::types::{CameraFrame, PixelFormat};
use crate::errors::MediaError;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::time::Duration;

/// Convert a frame to a tightly-packed RGB image, dropping alpha and any
/// row padding.
fn frame_to_rgb(frame: &CameraFrame) -> Result<RgbImage, MediaError> {
    let (width, height) = (frame.width, frame.height);
    let bpp = frame.format.bytes_per_pixel() as usize;
    let stride = frame.stride as usize;
    let expected = stride * height as usize;
    if frame.data.len() < expected {
        return Err(MediaError::Encode(format!(
            "frame data too small: expected {}, got {}",
            expected,
            frame.data.len()
        )));
    }

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height as usize {
        let row = &frame.data[y * stride..y * stride + width as usize * bpp];
        for px in row.chunks(bpp) {
            rgb.extend_from_slice(&px[..3]);
        }
    }

    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| MediaError::Encode("failed to assemble RGB image".to_string()))
}

/// Encode a frame as JPEG at the given quality factor
pub fn encode_jpeg(frame: &CameraFrame, quality: u8) -> Result<Vec<u8>, MediaError> {
    let rgb = frame_to_rgb(frame)?;
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder
        .write_image(
            rgb.as_raw(),
            frame.width,
            frame.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| MediaError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Encode a frame as PNG
pub fn encode_png(frame: &CameraFrame) -> Result<Vec<u8>, MediaError> {
    let rgb = frame_to_rgb(frame)?;
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(
            rgb.as_raw(),
            frame.width,
            frame.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| MediaError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Decode an encoded image (JPEG chunk, or a user-selected still) back
/// into a frame with the given presentation timestamp
pub fn decode_frame(data: &[u8], timestamp: Duration) -> Result<CameraFrame, MediaError> {
    let img = image::load_from_memory(data).map_err(|e| MediaError::Decode(e.to_string()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(CameraFrame::from_raw(
        width,
        height,
        PixelFormat::Rgb24,
        timestamp,
        rgb.into_raw(),
    ))
}

/// JFIF start-of-image marker
const SOI: [u8; 2] = [0xFF, 0xD8];
/// JFIF end-of-image marker
const EOI: [u8; 2] = [0xFF, 0xD9];

/// Split a concatenated-JFIF motion-JPEG byte stream into individual
/// JPEG images.
///
/// Scans for SOI/EOI marker pairs; bytes outside a marker pair are
/// ignored. Returns an error if no complete image is found.
pub fn split_mjpeg(data: &[u8]) -> Result<Vec<&[u8]>, MediaError> {
    let mut images = Vec::new();
    let mut start: Option<usize> = None;
    let mut i = 0;
    while i + 1 < data.len() {
        let marker = [data[i], data[i + 1]];
        if marker == SOI && start.is_none() {
            start = Some(i);
            i += 2;
        } else if marker == EOI && start.is_some() {
            let s = start.take().expect("start set");
            images.push(&data[s..i + 2]);
            i += 2;
        } else {
            i += 1;
        }
    }
    if images.is_empty() {
        return Err(MediaError::Decode(
            "no JPEG images found in motion-JPEG stream".to_string(),
        ));
    }
    Ok(images)
}
