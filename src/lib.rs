// SPDX-License-Identifier: MPL-2.0

//! Locket Capture - camera capture and moment-sharing core
//!
//! This library turns a press gesture plus a live camera stream into exactly
//! one square photo or video asset, ready to post with a caption.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`controller`]: Hold-to-decide capture state machine
//! - [`backends`]: Camera and file input boundary abstraction
//! - [`media`]: Frame codec and the chunked clip model
//! - [`pipelines`]: Photo and video capture pipelines
//! - [`storage`]: Temporary asset files and library export
//! - [`submit`]: Post composition and the delivery collaborator
//! - [`context`]: Navigation and theme display context
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```no_run
//! use locket_capture::backends::camera::{DeviceSession, TestPatternCamera};
//! use locket_capture::controller::CaptureController;
//! use locket_capture::storage::AssetStore;
//! use locket_capture::submit::ConsoleSink;
//! use locket_capture::Config;
//!
//! # async fn demo() -> Result<(), locket_capture::errors::CaptureError> {
//! let config = Config::default();
//! let device = DeviceSession::new(
//!     TestPatternCamera::new(),
//!     config.capture_format,
//!     config.default_facing,
//! );
//! let mut controller = CaptureController::new(
//!     device,
//!     AssetStore::new()?,
//!     Box::new(ConsoleSink),
//!     config,
//! );
//!
//! controller.acquire_stream(locket_capture::FacingMode::User).await?;
//! controller.begin_press()?;
//! tokio::time::sleep(std::time::Duration::from_millis(300)).await;
//! let asset = controller.end_press().await?;
//! println!("captured {} ({}px square)", asset.kind, asset.square_size);
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod context;
pub mod controller;
pub mod errors;
pub mod media;
pub mod pipelines;
pub mod storage;
pub mod submit;

// Re-export commonly used types
pub use backends::camera::{CaptureFormat, FacingMode};
pub use config::Config;
pub use constants::QualityPreset;
pub use controller::{CaptureController, CapturePhase};
pub use storage::{Asset, AssetKind};
