// SPDX-License-Identifier: MPL-2.0

//! Error types for the capture core

use std::fmt;

/// Result type alias using CaptureError
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Main capture error type
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// Camera-related errors
    Camera(CameraError),
    /// Recording-related errors
    Recording(RecordingError),
    /// Photo capture errors
    Photo(PhotoError),
    /// Session state machine violations
    Session(SessionError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone)]
pub enum CameraError {
    /// The platform declined camera access
    PermissionDenied,
    /// No camera exists, or the device could not be opened
    DeviceUnavailable(String),
    /// Camera stream ended or was stopped during operation
    Disconnected,
    /// Requested capture format is not supported
    FormatNotSupported(String),
}

/// Recording-specific errors
#[derive(Debug, Clone)]
pub enum RecordingError {
    /// Failed to start the clip recorder
    StartFailed(String),
    /// Recorder or codec error mid-capture
    Failed(String),
    /// Recording already in progress
    AlreadyRecording,
    /// The recorder stopped without buffering a single frame
    NoFramesCaptured,
}

/// Photo capture errors
#[derive(Debug, Clone)]
pub enum PhotoError {
    /// No frame available for capture
    NoFrameAvailable,
    /// Encoding failed
    EncodingFailed(String),
    /// Save failed
    SaveFailed(String),
}

/// Frame encode/decode errors from the media codec layer
#[derive(Debug, Clone)]
pub enum MediaError {
    /// Encoding a frame failed
    Encode(String),
    /// Decoding a buffered chunk failed
    Decode(String),
}

/// Invalid operations against the capture session state machine
#[derive(Debug, Clone)]
pub enum SessionError {
    /// Operation attempted from a phase that does not allow it
    InvalidPhase {
        operation: &'static str,
        phase: &'static str,
    },
    /// Operation requires a live asset and none exists
    NoLiveAsset,
    /// The live asset was already submitted
    AlreadySubmitted,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Camera(e) => write!(f, "Camera error: {}", e),
            CaptureError::Recording(e) => write!(f, "Recording error: {}", e),
            CaptureError::Photo(e) => write!(f, "Photo error: {}", e),
            CaptureError::Session(e) => write!(f, "Session error: {}", e),
            CaptureError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CaptureError::Storage(msg) => write!(f, "Storage error: {}", msg),
            CaptureError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "Camera permission denied"),
            CameraError::DeviceUnavailable(msg) => write!(f, "Camera unavailable: {}", msg),
            CameraError::Disconnected => write!(f, "Camera stream disconnected"),
            CameraError::FormatNotSupported(msg) => write!(f, "Format not supported: {}", msg),
        }
    }
}

impl fmt::Display for RecordingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingError::StartFailed(msg) => write!(f, "Failed to start recording: {}", msg),
            RecordingError::Failed(msg) => write!(f, "Recording failed: {}", msg),
            RecordingError::AlreadyRecording => write!(f, "Recording already in progress"),
            RecordingError::NoFramesCaptured => write!(f, "Recording produced no frames"),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::NoFrameAvailable => write!(f, "No frame available for capture"),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            PhotoError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::Encode(msg) => write!(f, "Frame encode error: {}", msg),
            MediaError::Decode(msg) => write!(f, "Chunk decode error: {}", msg),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidPhase { operation, phase } => {
                write!(f, "{} is not valid while {}", operation, phase)
            }
            SessionError::NoLiveAsset => write!(f, "No live asset in this session"),
            SessionError::AlreadySubmitted => write!(f, "Asset was already submitted"),
        }
    }
}

impl std::error::Error for CaptureError {}
impl std::error::Error for CameraError {}
impl std::error::Error for RecordingError {}
impl std::error::Error for PhotoError {}
impl std::error::Error for MediaError {}
impl std::error::Error for SessionError {}

// Conversions from sub-errors to CaptureError
impl From<CameraError> for CaptureError {
    fn from(err: CameraError) -> Self {
        CaptureError::Camera(err)
    }
}

impl From<RecordingError> for CaptureError {
    fn from(err: RecordingError) -> Self {
        CaptureError::Recording(err)
    }
}

impl From<PhotoError> for CaptureError {
    fn from(err: PhotoError) -> Self {
        CaptureError::Photo(err)
    }
}

impl From<SessionError> for CaptureError {
    fn from(err: SessionError) -> Self {
        CaptureError::Session(err)
    }
}

// Codec failures surface as photo errors on the still path and as
// recording errors on the clip path.
impl From<MediaError> for PhotoError {
    fn from(err: MediaError) -> Self {
        PhotoError::EncodingFailed(err.to_string())
    }
}

impl From<MediaError> for RecordingError {
    fn from(err: MediaError) -> Self {
        RecordingError::Failed(err.to_string())
    }
}

// Conversions for I/O errors
impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for PhotoError {
    fn from(err: std::io::Error) -> Self {
        PhotoError::SaveFailed(err.to_string())
    }
}
