// SPDX-License-Identifier: MPL-2.0

//! Media encoding, decoding, and the chunked clip model

pub mod clip;
pub mod codec;

pub use clip::{ClipReader, ClipWriter, EncodedChunk, VideoClip};
