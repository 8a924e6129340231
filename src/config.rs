// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling
//!
//! Persisted as JSON under the user config directory. Missing or unreadable
//! files fall back to defaults; unknown fields are ignored so older builds
//! can read newer files.

use crate::backends::camera::types::{CaptureFormat, FacingMode};
use crate::constants::{self, QualityPreset};
use crate::context::ThemeGradient;
use crate::pipelines::photo::EncodingFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Capture core configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Press duration (ms) separating tap-to-photo from hold-to-record
    pub hold_threshold_ms: u64,
    /// Maximum recording duration (ms), enforced without user input
    pub recording_ceiling_ms: u64,
    /// Facing mode used on startup
    pub default_facing: FacingMode,
    /// Capture resolution and framerate
    pub capture_format: CaptureFormat,
    /// Still output encoding
    pub photo_format: EncodingFormat,
    /// Encode quality for stills and clips
    pub quality: QualityPreset,
    /// Mirror front-camera output so captures match the preview
    pub mirror_front: bool,
    /// Theme gradient for the shell
    pub theme: ThemeGradient,
    /// Override for the export directory (defaults to ~/Pictures/Locket)
    pub save_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hold_threshold_ms: constants::HOLD_THRESHOLD.as_millis() as u64,
            recording_ceiling_ms: constants::RECORDING_CEILING.as_millis() as u64,
            default_facing: FacingMode::User,
            capture_format: CaptureFormat::default(),
            photo_format: EncodingFormat::default(),
            quality: QualityPreset::default(),
            mirror_front: true,
            theme: ThemeGradient::default(),
            save_dir: None,
        }
    }
}

/// Default folder name for exported captures
const SAVE_FOLDER: &str = "Locket";

impl Config {
    /// Hold threshold as a duration
    pub fn hold_threshold(&self) -> Duration {
        Duration::from_millis(self.hold_threshold_ms)
    }

    /// Recording ceiling as a duration
    ///
    /// A ceiling at or below the threshold would make every hold gesture
    /// degenerate; such values are clamped up to one threshold past.
    pub fn recording_ceiling(&self) -> Duration {
        let ceiling = Duration::from_millis(self.recording_ceiling_ms);
        let threshold = self.hold_threshold();
        if ceiling <= threshold {
            warn!(
                ceiling_ms = self.recording_ceiling_ms,
                threshold_ms = self.hold_threshold_ms,
                "Recording ceiling at or below hold threshold; clamping"
            );
            threshold + threshold
        } else {
            ceiling
        }
    }

    /// Directory exported captures are saved to
    pub fn save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(|| {
            dirs::picture_dir()
                .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
                .join(SAVE_FOLDER)
        })
    }

    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("locket-capture")
            .join("config.json")
    }

    /// Load config from a file, falling back to defaults when the file is
    /// missing or malformed
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Config loaded");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Malformed config; using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "No config file; using defaults");
                Self::default()
            }
        }
    }

    /// Write config as pretty JSON, creating parent directories
    pub fn save(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, contents)
    }
}
