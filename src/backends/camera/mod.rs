// SPDX-License-Identifier: MPL-2.0
// Camera backend with trait-based abstraction for multi-backend support

//! Camera backend abstraction
//!
//! This module provides the device capability boundary for the capture core.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  CaptureController  │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │    DeviceSession    │  ← Stream lifecycle, facing switch
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraBackend trait │  ← Permission check, stream acquisition
//! └──────────┬──────────┘
//!            │
//!            ▼
//!     ┌─────────────┐
//!     │ TestPattern │  ← Deterministic synthetic implementation
//!     └─────────────┘
//! ```
//!
//! The stream handle is owned exclusively by the session; exactly one
//! consumer reads frames at a time (enforced by the `&mut` receiver), and
//! switching facing mode stops the existing stream before requesting a
//! new one so device handles are never leaked.

pub mod test_pattern;
pub mod types;

pub use test_pattern::TestPatternCamera;
pub use types::*;

use crate::errors::CameraError;
use futures::StreamExt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Camera backend trait
///
/// Backends provide a permission check and stream acquisition parameterized
/// by facing mode. Frame delivery happens through the returned
/// [`CameraStream`].
#[allow(async_fn_in_trait)]
pub trait CameraBackend {
    /// Human-readable backend name for logs
    fn name(&self) -> &'static str;

    /// Query camera permission without acquiring a stream
    async fn permission(&self) -> PermissionState;

    /// Open a video stream for the given facing mode
    ///
    /// # Errors
    ///
    /// Returns `CameraError::DeviceUnavailable` if no camera exists for the
    /// facing mode, or `CameraError::FormatNotSupported` if the requested
    /// format cannot be produced.
    async fn open(
        &self,
        facing: FacingMode,
        format: &CaptureFormat,
    ) -> Result<CameraStream, CameraError>;
}

/// A live camera stream
///
/// Wraps the backend's frame stream together with a stop signal. Dropping
/// the stream stops it.
pub struct CameraStream {
    facing: FacingMode,
    format: CaptureFormat,
    frames: FrameStream,
    stop: watch::Sender<bool>,
    stopped: bool,
}

impl std::fmt::Debug for CameraStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraStream")
            .field("facing", &self.facing)
            .field("format", &self.format)
            .field("stopped", &self.stopped)
            .finish()
    }
}

impl CameraStream {
    /// Assemble a stream from backend parts
    pub fn new(
        facing: FacingMode,
        format: CaptureFormat,
        frames: FrameStream,
        stop: watch::Sender<bool>,
    ) -> Self {
        Self {
            facing,
            format,
            frames,
            stop,
            stopped: false,
        }
    }

    /// Receive the next frame in presentation order
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Disconnected` once the stream has ended or
    /// been stopped.
    pub async fn next_frame(&mut self) -> Result<CameraFrame, CameraError> {
        if self.stopped {
            return Err(CameraError::Disconnected);
        }
        self.frames.next().await.ok_or(CameraError::Disconnected)
    }

    /// Stop the stream's tracks; idempotent
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        // Producer exits on the next tick; an already-gone producer is fine.
        if self.stop.send(true).is_err() {
            debug!("Stream producer already finished");
        }
    }

    /// Facing mode this stream was opened with
    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    /// Capture format this stream was opened with
    pub fn format(&self) -> CaptureFormat {
        self.format
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Explicitly owned device session
///
/// Owns the backend and at most one live stream. Passed into the capture
/// controller at construction so there is no ambient device state.
#[derive(Debug)]
pub struct DeviceSession<B: CameraBackend> {
    backend: B,
    format: CaptureFormat,
    facing: FacingMode,
    stream: Option<CameraStream>,
}

impl<B: CameraBackend> DeviceSession<B> {
    /// Create a session; no stream is acquired yet
    pub fn new(backend: B, format: CaptureFormat, facing: FacingMode) -> Self {
        Self {
            backend,
            format,
            facing,
            stream: None,
        }
    }

    /// Acquire a stream for the given facing mode
    ///
    /// Any previously held stream is stopped first. A platform-level denial
    /// surfaces as `CameraError::PermissionDenied` and leaves the session
    /// camera-less.
    pub async fn acquire(&mut self, facing: FacingMode) -> Result<(), CameraError> {
        if let PermissionState::Denied = self.backend.permission().await {
            warn!(backend = self.backend.name(), "Camera permission denied");
            return Err(CameraError::PermissionDenied);
        }

        if let Some(mut old) = self.stream.take() {
            debug!(facing = %old.facing(), "Stopping previous stream");
            old.stop();
        }

        let stream = self.backend.open(facing, &self.format).await?;
        info!(
            backend = self.backend.name(),
            facing = %facing,
            format = %self.format,
            "Camera stream acquired"
        );
        self.facing = facing;
        self.stream = Some(stream);
        Ok(())
    }

    /// Switch between front and rear cameras
    ///
    /// Stops the current stream's tracks before requesting the new one.
    pub async fn switch_facing(&mut self) -> Result<(), CameraError> {
        let next = self.facing.flipped();
        self.acquire(next).await
    }

    /// Stop and drop the current stream, if any; idempotent
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!("Camera stream released");
        }
    }

    /// Whether a live stream is held
    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    /// Facing mode of the held (or last requested) stream
    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    /// Capture format for this session
    pub fn format(&self) -> CaptureFormat {
        self.format
    }

    /// Mutable access to the live stream for frame consumption
    pub fn stream_mut(&mut self) -> Option<&mut CameraStream> {
        self.stream.as_mut()
    }

    /// Move the stream out (for a recording task); pair with `restore`
    pub fn take_stream(&mut self) -> Option<CameraStream> {
        self.stream.take()
    }

    /// Return a stream previously moved out with `take_stream`
    ///
    /// If a newer stream was acquired in the meantime, the returned one is
    /// stopped and discarded.
    pub fn restore(&mut self, mut stream: CameraStream) {
        if self.stream.is_some() {
            stream.stop();
            return;
        }
        self.stream = Some(stream);
    }
}
