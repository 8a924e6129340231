// SPDX-License-Identifier: MPL-2.0

//! Video capture pipeline: clip recording and square-crop normalization

pub mod recorder;
pub mod reencode;

pub use recorder::{ClipRecorder, RecordedClip, StopReason};
pub use reencode::normalize_clip;
