// SPDX-License-Identifier: MPL-2.0

//! Chunked video clip model
//!
//! A recording buffers one encoded chunk per captured frame. Stopping the
//! recorder finalizes the buffered chunks into a [`VideoClip`] — one binary
//! object that can be written out as a motion-JPEG stream or replayed in
//! presentation order through a [`ClipReader`].

use crate::backends::camera::types::CameraFrame;
use crate::errors::MediaError;
use crate::media::codec;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

/// A single buffered chunk: one encoded frame plus its presentation time
#[derive(Debug, Clone)]
pub struct EncodedChunk {
    pub data: Arc<[u8]>,
    pub timestamp: Duration,
}

/// A finalized clip of encoded frames in presentation order
#[derive(Debug, Clone)]
pub struct VideoClip {
    chunks: Vec<EncodedChunk>,
    width: u32,
    height: u32,
    framerate: u32,
}

impl VideoClip {
    /// Number of frames in the clip
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if the clip holds no frames
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Frame dimensions
    pub fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Clip framerate
    pub fn framerate(&self) -> u32 {
        self.framerate
    }

    /// Clip duration derived from frame count and framerate
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.chunks.len() as f64 / self.framerate.max(1) as f64)
    }

    /// Buffered chunks in presentation order
    pub fn chunks(&self) -> &[EncodedChunk] {
        &self.chunks
    }

    /// Total encoded size in bytes
    pub fn byte_len(&self) -> usize {
        self.chunks.iter().map(|c| c.data.len()).sum()
    }

    /// Consume the clip into a frame-by-frame reader
    pub fn into_reader(self) -> ClipReader {
        ClipReader {
            clip: self,
            position: 0,
        }
    }

    /// Write the clip as a concatenated-JFIF motion-JPEG stream
    pub fn write_mjpeg<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for chunk in &self.chunks {
            writer.write_all(&chunk.data)?;
        }
        Ok(())
    }

    /// Parse a motion-JPEG byte stream into a clip
    ///
    /// Chunk timestamps are synthesized from the given framerate since the
    /// stream carries none.
    pub fn from_mjpeg(data: &[u8], framerate: u32) -> Result<Self, MediaError> {
        let images = codec::split_mjpeg(data)?;
        let period = Duration::from_secs_f64(1.0 / framerate.max(1) as f64);

        // Probe the first image for dimensions; all frames share them.
        let first = codec::decode_frame(images[0], Duration::ZERO)?;
        let (width, height) = (first.width, first.height);

        let chunks = images
            .into_iter()
            .enumerate()
            .map(|(i, img)| EncodedChunk {
                data: Arc::from(img.to_vec().into_boxed_slice()),
                timestamp: period * i as u32,
            })
            .collect();

        Ok(Self {
            chunks,
            width,
            height,
            framerate,
        })
    }
}

/// Frame-by-frame reader over a clip's chunks
///
/// Decodes each chunk exactly once, in presentation order. `next_frame`
/// returns `None` once playback has ended.
#[derive(Debug)]
pub struct ClipReader {
    clip: VideoClip,
    position: usize,
}

impl ClipReader {
    /// Decode and return the next frame, or `None` at end of clip
    pub fn next_frame(&mut self) -> Result<Option<CameraFrame>, MediaError> {
        let Some(chunk) = self.clip.chunks.get(self.position) else {
            return Ok(None);
        };
        let frame = codec::decode_frame(&chunk.data, chunk.timestamp)?;
        self.position += 1;
        Ok(Some(frame))
    }

    /// True once every chunk has been decoded
    pub fn ended(&self) -> bool {
        self.position >= self.clip.len()
    }

    /// Frames decoded so far
    pub fn frames_read(&self) -> usize {
        self.position
    }

    /// The clip being read
    pub fn clip(&self) -> &VideoClip {
        &self.clip
    }
}

/// Accumulates encoded chunks during recording or re-encoding
///
/// `finish` finalizes the buffered output into a [`VideoClip`].
#[derive(Debug)]
pub struct ClipWriter {
    chunks: Vec<EncodedChunk>,
    width: u32,
    height: u32,
    framerate: u32,
    quality: u8,
    base_timestamp: Option<Duration>,
}

impl ClipWriter {
    /// Start a writer for frames of the given size and rate
    pub fn new(width: u32, height: u32, framerate: u32, quality: u8) -> Self {
        Self {
            chunks: Vec::new(),
            width,
            height,
            framerate,
            quality,
            base_timestamp: None,
        }
    }

    /// Encode one frame and buffer it as a chunk
    ///
    /// Timestamps are rebased so the first pushed frame sits at zero.
    pub fn push_frame(&mut self, frame: &CameraFrame) -> Result<(), MediaError> {
        let base = *self.base_timestamp.get_or_insert(frame.timestamp);
        let timestamp = frame.timestamp.saturating_sub(base);
        let data = codec::encode_jpeg(frame, self.quality)?;
        self.chunks.push(EncodedChunk {
            data: Arc::from(data.into_boxed_slice()),
            timestamp,
        });
        Ok(())
    }

    /// Chunks buffered so far
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if nothing has been buffered yet
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Finalize the buffered output into a clip
    pub fn finish(self) -> VideoClip {
        VideoClip {
            chunks: self.chunks,
            width: self.width,
            height: self.height,
            framerate: self.framerate,
        }
    }
}
