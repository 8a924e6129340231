// SPDX-License-Identifier: GPL-3.0-only

//! Capture session phases
//!
//! ```text
//!            begin_press            threshold fires
//!   Idle ───────────────▶ Holding ─────────────────▶ Recording
//!    ▲                       │                           │
//!    │                       │ release < threshold       │ release, or
//!    │ delete                ▼                           ▼ ceiling
//!    └────────────────── Reviewing ◀─────────────────────┘
//!                         (image)          (video)
//! ```
//!
//! No other transitions are valid. `begin_press` while holding or recording
//! is a no-op; every other out-of-phase operation is rejected.

/// Phase of the capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapturePhase {
    /// Stream acquired (or camera-less after an error); nothing pressed
    #[default]
    Idle,
    /// Press down, threshold timer armed, no capture side effects yet
    Holding,
    /// Threshold passed; the clip recorder is consuming frames
    Recording,
    /// Exactly one asset is live and editable
    Reviewing,
}

impl CapturePhase {
    /// Name used in session error messages
    pub fn name(&self) -> &'static str {
        match self {
            CapturePhase::Idle => "idle",
            CapturePhase::Holding => "holding",
            CapturePhase::Recording => "recording",
            CapturePhase::Reviewing => "reviewing",
        }
    }

    /// A press gesture may begin only when idle
    pub fn accepts_press(&self) -> bool {
        matches!(self, CapturePhase::Idle)
    }

    /// A press is in flight (release is meaningful)
    pub fn press_in_flight(&self) -> bool {
        matches!(self, CapturePhase::Holding | CapturePhase::Recording)
    }
}

impl std::fmt::Display for CapturePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
