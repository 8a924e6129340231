// SPDX-License-Identifier: GPL-3.0-only

//! Hold-to-decide capture controller
//!
//! Converts a press gesture plus a live camera stream into exactly one
//! square image or video asset. A press that releases before the hold
//! threshold captures a still from the current frame; a press held past it
//! starts the clip recorder, which stops on release or at the recording
//! ceiling. Front-camera output is mirrored so captures match the preview.
//!
//! The controller owns the device session, the asset store, and the post
//! sink; it is the single writer of the session phase.

pub mod state;

pub use state::CapturePhase;

use crate::backends::camera::{CameraBackend, CameraStream, DeviceSession, FacingMode};
use crate::backends::file_source::{self, SelectedMedia};
use crate::config::Config;
use crate::errors::{
    CameraError, CaptureError, CaptureResult, PhotoError, RecordingError, SessionError,
};
use crate::pipelines::photo::PhotoPipeline;
use crate::pipelines::video::{ClipRecorder, RecordedClip, normalize_clip};
use crate::storage::{Asset, AssetStore};
use crate::submit::{Post, PostSink};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How the hold task resolved
enum HoldOutcome {
    /// Released before the threshold; no capture happened yet
    Released { stream: CameraStream },
    /// Threshold passed; the recorder ran to release, ceiling, or error
    Recorded {
        stream: CameraStream,
        result: Result<RecordedClip, RecordingError>,
    },
}

/// A press gesture currently in flight
struct PressInFlight {
    pressed_at: tokio::time::Instant,
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<HoldOutcome>,
}

/// Capture controller
///
/// Generic over the camera backend; the device session is passed in at
/// construction so there is no ambient device state.
pub struct CaptureController<B: CameraBackend> {
    device: DeviceSession<B>,
    store: AssetStore,
    sink: Box<dyn PostSink + Send>,
    config: Config,
    phase: Arc<watch::Sender<CapturePhase>>,
    press: Option<PressInFlight>,
    caption: String,
    recipients: Vec<String>,
    submitted: bool,
}

impl<B: CameraBackend> CaptureController<B> {
    /// Build a controller from its collaborators
    pub fn new(
        device: DeviceSession<B>,
        store: AssetStore,
        sink: Box<dyn PostSink + Send>,
        config: Config,
    ) -> Self {
        let (phase, _) = watch::channel(CapturePhase::Idle);
        Self {
            device,
            store,
            sink,
            config,
            phase: Arc::new(phase),
            press: None,
            caption: String::new(),
            recipients: Vec::new(),
            submitted: false,
        }
    }

    /// Current session phase
    pub fn phase(&self) -> CapturePhase {
        *self.phase.borrow()
    }

    /// Subscribe to phase transitions
    pub fn phase_watch(&self) -> watch::Receiver<CapturePhase> {
        self.phase.subscribe()
    }

    /// Facing mode of the current (or last requested) stream
    pub fn facing(&self) -> FacingMode {
        self.device.facing()
    }

    /// Whether a camera stream is held
    pub fn has_stream(&self) -> bool {
        self.device.has_stream()
    }

    /// The live asset, if the session is reviewing one
    pub fn live_asset(&self) -> Option<&Asset> {
        self.store.live()
    }

    /// Caption attached to the live asset
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Set the caption shown on the composed post
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// Select friend recipients for the composed post
    pub fn set_recipients(&mut self, recipients: Vec<String>) {
        self.recipients = recipients;
    }

    /// Acquire a camera stream for the given facing mode
    ///
    /// Replaces any previously held stream (stopping its tracks first) and
    /// leaves the session idle. A `PermissionDenied` or `DeviceUnavailable`
    /// failure leaves the session camera-less but usable: file selection
    /// still works.
    pub async fn acquire_stream(&mut self, facing: FacingMode) -> CaptureResult<()> {
        let phase = self.phase();
        if phase.press_in_flight() || phase == CapturePhase::Reviewing {
            return Err(SessionError::InvalidPhase {
                operation: "acquire_stream",
                phase: phase.name(),
            }
            .into());
        }

        self.device.acquire(facing).await?;
        self.phase.send_replace(CapturePhase::Idle);
        Ok(())
    }

    /// Switch between front and rear cameras
    ///
    /// The existing stream's tracks are stopped before the new stream is
    /// requested, so device handles are never leaked.
    pub async fn switch_facing(&mut self) -> CaptureResult<()> {
        let phase = self.phase();
        if phase != CapturePhase::Idle {
            return Err(SessionError::InvalidPhase {
                operation: "switch_facing",
                phase: phase.name(),
            }
            .into());
        }
        self.device.switch_facing().await?;
        Ok(())
    }

    /// Begin a press gesture
    ///
    /// Records the press start, arms the hold-threshold timer, and moves to
    /// holding. No capture has happened yet. A press while already holding
    /// or recording is a guarded no-op; a press while reviewing is an error
    /// (delete the asset first).
    pub fn begin_press(&mut self) -> CaptureResult<()> {
        let phase = self.phase();
        if phase.press_in_flight() {
            debug!(%phase, "Ignoring begin_press during active gesture");
            return Ok(());
        }
        if !phase.accepts_press() {
            return Err(SessionError::InvalidPhase {
                operation: "begin_press",
                phase: phase.name(),
            }
            .into());
        }

        let mut stream = self.device.take_stream().ok_or_else(|| {
            CaptureError::Camera(CameraError::DeviceUnavailable(
                "no camera stream acquired".to_string(),
            ))
        })?;

        let threshold = self.config.hold_threshold();
        let recorder = ClipRecorder::new(self.config.recording_ceiling(), self.config.quality);
        let (stop_tx, mut stop_rx) = oneshot::channel();
        let phase_tx = Arc::clone(&self.phase);

        let task = tokio::spawn(async move {
            let threshold_timer = tokio::time::sleep(threshold);
            tokio::pin!(threshold_timer);

            let released_early = tokio::select! {
                // A release landing exactly on the threshold counts as a tap
                biased;
                _ = &mut stop_rx => true,
                _ = &mut threshold_timer => false,
            };
            if released_early {
                return HoldOutcome::Released { stream };
            }

            phase_tx.send_replace(CapturePhase::Recording);
            let result = recorder.record(&mut stream, stop_rx).await;
            HoldOutcome::Recorded { stream, result }
        });

        self.press = Some(PressInFlight {
            pressed_at: tokio::time::Instant::now(),
            stop_tx,
            task,
        });
        self.phase.send_replace(CapturePhase::Holding);
        debug!(threshold_ms = threshold.as_millis() as u64, "Press began");
        Ok(())
    }

    /// End the press gesture and produce the session's asset
    ///
    /// Tap (released under the threshold): the current frame becomes a
    /// square still. Hold: the recorded clip is normalized (mirrored for
    /// the front camera, crop-only for the rear) into a square video.
    /// Either way the session moves to reviewing with exactly one live
    /// asset.
    pub async fn end_press(&mut self) -> CaptureResult<Asset> {
        let press = self.press.take().ok_or(SessionError::InvalidPhase {
            operation: "end_press",
            phase: self.phase().name(),
        })?;

        let held_for = press.pressed_at.elapsed();
        // The task may already have finished (ceiling); a failed send is fine.
        let _ = press.stop_tx.send(());
        let outcome = press
            .task
            .await
            .map_err(|e| CaptureError::Other(format!("hold task failed: {}", e)))?;

        let result = self.resolve_press(outcome).await;
        match &result {
            Ok(asset) => {
                info!(
                    held_ms = held_for.as_millis() as u64,
                    kind = %asset.kind,
                    square_size = asset.square_size,
                    "Press resolved"
                );
                self.submitted = false;
                self.phase.send_replace(CapturePhase::Reviewing);
            }
            Err(e) => {
                warn!(error = %e, "Press failed; resetting to idle");
                self.phase.send_replace(CapturePhase::Idle);
            }
        }
        result
    }

    /// Turn a finished hold task into a stored asset
    async fn resolve_press(&mut self, outcome: HoldOutcome) -> CaptureResult<Asset> {
        match outcome {
            HoldOutcome::Released { mut stream } => {
                let facing = stream.facing();
                let frame = stream
                    .next_frame()
                    .await
                    .map_err(|_| PhotoError::NoFrameAvailable)?;
                self.device.restore(stream);

                let mirror = facing.is_mirrored() && self.config.mirror_front;
                let pipeline = PhotoPipeline::new(self.config.photo_format, self.config.quality);
                let still = pipeline.process(&frame, mirror)?;
                Ok(self.store.store_still(&still)?.clone())
            }
            HoldOutcome::Recorded { stream, result } => {
                let facing = stream.facing();
                self.device.restore(stream);

                let recorded = result?;
                debug!(
                    stop_reason = ?recorded.stop_reason,
                    frames = recorded.clip.len(),
                    "Recorder finished"
                );
                let mirror = facing.is_mirrored() && self.config.mirror_front;
                let normalized =
                    normalize_clip(recorded.clip, mirror, self.config.quality).await?;
                Ok(self.store.store_clip(&normalized)?.clone())
            }
        }
    }

    /// Select a local file as the asset source
    ///
    /// Images are square-cropped in a single pass; clips run the full
    /// re-encode normalization. File media is never mirrored.
    pub async fn select_file(&mut self, path: &Path) -> CaptureResult<Asset> {
        let phase = self.phase();
        if phase != CapturePhase::Idle {
            return Err(SessionError::InvalidPhase {
                operation: "select_file",
                phase: phase.name(),
            }
            .into());
        }

        let media = file_source::load_media(path, self.config.capture_format.framerate)?;
        let asset = match media {
            SelectedMedia::Image(frame) => {
                let pipeline = PhotoPipeline::new(self.config.photo_format, self.config.quality);
                let still = pipeline.process(&frame, false)?;
                self.store.store_still(&still)?.clone()
            }
            SelectedMedia::Video(clip) => {
                let normalized = normalize_clip(clip, false, self.config.quality).await?;
                self.store.store_clip(&normalized)?.clone()
            }
        };

        self.submitted = false;
        self.phase.send_replace(CapturePhase::Reviewing);
        info!(path = %path.display(), kind = %asset.kind, "File selected as asset");
        Ok(asset)
    }

    /// Delete the live asset and return to idle
    ///
    /// Releases the asset's temporary file, clears the caption, and re-arms
    /// the camera stream if none is held (a failed re-acquire leaves the
    /// session camera-less; file selection still works).
    pub async fn delete_asset(&mut self) -> CaptureResult<()> {
        let phase = self.phase();
        if phase != CapturePhase::Reviewing {
            return Err(SessionError::InvalidPhase {
                operation: "delete_asset",
                phase: phase.name(),
            }
            .into());
        }
        if !self.store.release() {
            return Err(SessionError::NoLiveAsset.into());
        }

        self.caption.clear();
        self.recipients.clear();
        self.submitted = false;
        self.phase.send_replace(CapturePhase::Idle);

        if !self.device.has_stream() {
            let facing = self.device.facing();
            if let Err(e) = self.device.acquire(facing).await {
                warn!(error = %e, "Could not re-acquire camera after delete");
            }
        }
        debug!("Asset deleted; session idle");
        Ok(())
    }

    /// Submit the live asset with its caption to the post sink
    ///
    /// Fire-and-forget; delivered at most once per asset.
    pub fn submit(&mut self) -> CaptureResult<()> {
        let phase = self.phase();
        if phase != CapturePhase::Reviewing {
            return Err(SessionError::InvalidPhase {
                operation: "submit",
                phase: phase.name(),
            }
            .into());
        }
        let asset = self.store.live().ok_or(SessionError::NoLiveAsset)?;
        if self.submitted {
            return Err(SessionError::AlreadySubmitted.into());
        }

        let post = Post {
            asset: asset.clone(),
            caption: self.caption.clone(),
            recipients: self.recipients.clone(),
        };
        self.sink.deliver(&post);
        self.submitted = true;
        Ok(())
    }

    /// Copy the live asset into the configured save directory
    pub fn export_asset(&self) -> CaptureResult<PathBuf> {
        Ok(self.store.export(&self.config.save_dir())?)
    }

    /// Stop the camera stream and drop the session's resources
    pub fn release_stream(&mut self) {
        self.device.release();
    }
}
