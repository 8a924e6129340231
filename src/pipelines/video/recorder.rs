// SPDX-License-Identifier: MPL-2.0

//! Clip recording
//!
//! Consumes frames from a live camera stream and buffers one encoded chunk
//! per frame. Recording ends on an explicit stop signal (press released) or
//! when the ceiling deadline fires — the ceiling bounds resource use and is
//! not an error. The buffered chunks are finalized into a single
//! [`VideoClip`].

use crate::backends::camera::CameraStream;
use crate::constants::QualityPreset;
use crate::errors::RecordingError;
use crate::media::{ClipWriter, VideoClip};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Why a recording stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The press was released
    Released,
    /// The recording ceiling fired
    Ceiling,
    /// The camera stream ended underneath the recorder
    StreamEnded,
}

/// A finalized recording
#[derive(Debug)]
pub struct RecordedClip {
    pub clip: VideoClip,
    pub stop_reason: StopReason,
}

/// Clip recorder
#[derive(Debug, Clone, Copy)]
pub struct ClipRecorder {
    ceiling: Duration,
    quality: QualityPreset,
}

impl ClipRecorder {
    /// Recorder with the given ceiling and encode quality
    pub fn new(ceiling: Duration, quality: QualityPreset) -> Self {
        Self { ceiling, quality }
    }

    /// Record from the stream until the stop signal or the ceiling
    ///
    /// Holds the only frame consumer for the duration of the recording.
    /// Stopping when already stopped is harmless: a dropped stop sender
    /// reads as an immediate stop signal.
    ///
    /// # Errors
    ///
    /// `RecordingError::NoFramesCaptured` if the recorder stopped before a
    /// single frame arrived, `RecordingError::Failed` on a codec error
    /// mid-capture.
    pub async fn record(
        &self,
        stream: &mut CameraStream,
        mut stop_rx: oneshot::Receiver<()>,
    ) -> Result<RecordedClip, RecordingError> {
        let format = stream.format();
        let mut writer = ClipWriter::new(
            format.width,
            format.height,
            format.framerate,
            self.quality.jpeg_quality(),
        );

        info!(
            facing = %stream.facing(),
            format = %format,
            ceiling_ms = self.ceiling.as_millis() as u64,
            "Recording started"
        );

        let deadline = tokio::time::sleep(self.ceiling);
        tokio::pin!(deadline);

        let stop_reason = loop {
            tokio::select! {
                // Stop conditions win over a simultaneously ready frame
                biased;
                _ = &mut deadline => {
                    debug!(frames = writer.len(), "Recording ceiling reached");
                    break StopReason::Ceiling;
                }
                _ = &mut stop_rx => {
                    debug!(frames = writer.len(), "Recording stop requested");
                    break StopReason::Released;
                }
                frame = stream.next_frame() => {
                    match frame {
                        Ok(frame) => writer.push_frame(&frame)?,
                        Err(e) => {
                            warn!(error = %e, "Camera stream ended during recording");
                            break StopReason::StreamEnded;
                        }
                    }
                }
            }
        };

        if writer.is_empty() {
            return Err(RecordingError::NoFramesCaptured);
        }

        let clip = writer.finish();
        info!(
            frames = clip.len(),
            duration_ms = clip.duration().as_millis() as u64,
            stop_reason = ?stop_reason,
            "Recording finalized"
        );
        Ok(RecordedClip { clip, stop_reason })
    }
}
