// SPDX-License-Identifier: MPL-2.0

//! Temporary asset storage
//!
//! Captured assets live as temporary files until deleted or replaced —
//! the on-disk file stands in for the browser object URL of the original
//! design. At most one asset is live per store; storing a new one releases
//! the previous file first.

use crate::media::VideoClip;
use crate::pipelines::photo::EncodedStill;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Kind of a produced asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Video,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Image => write!(f, "image"),
            AssetKind::Video => write!(f, "video"),
        }
    }
}

/// A stored capture asset
///
/// Immutable after creation; the backing file is owned by the store and
/// removed on release.
#[derive(Debug, Clone)]
pub struct Asset {
    pub id: Uuid,
    pub kind: AssetKind,
    /// Side length of the square output
    pub square_size: u32,
    /// Temporary file backing this asset
    pub path: PathBuf,
    /// Clip duration; `None` for stills
    pub duration: Option<Duration>,
}

/// Owns the temporary files behind capture assets
#[derive(Debug)]
pub struct AssetStore {
    dir: PathBuf,
    live: Option<Asset>,
}

impl AssetStore {
    /// Store rooted in the user cache directory (falls back to the system
    /// temp directory)
    pub fn new() -> std::io::Result<Self> {
        let dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("locket-capture");
        Self::with_dir(dir)
    }

    /// Store rooted at an explicit directory (used by tests)
    pub fn with_dir(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, live: None })
    }

    /// Store an encoded still as the live asset
    ///
    /// Any previous asset's file is released first.
    pub fn store_still(&mut self, still: &EncodedStill) -> std::io::Result<&Asset> {
        self.release();

        let id = Uuid::new_v4();
        let path = self
            .dir
            .join(format!("asset-{}.{}", id, still.format.extension()));
        std::fs::write(&path, &still.data)?;

        info!(
            id = %id,
            path = %path.display(),
            square_size = still.square_size,
            "Still asset stored"
        );

        self.live = Some(Asset {
            id,
            kind: AssetKind::Image,
            square_size: still.square_size,
            path,
            duration: None,
        });
        Ok(self.live.as_ref().expect("just stored"))
    }

    /// Store a normalized clip as the live asset
    pub fn store_clip(&mut self, clip: &VideoClip) -> std::io::Result<&Asset> {
        self.release();

        let id = Uuid::new_v4();
        let path = self.dir.join(format!("asset-{}.mjpeg", id));
        let file = std::fs::File::create(&path)?;
        let mut writer = std::io::BufWriter::new(file);
        clip.write_mjpeg(&mut writer)?;
        std::io::Write::flush(&mut writer)?;

        let (square_size, _) = clip.frame_size();
        info!(
            id = %id,
            path = %path.display(),
            square_size,
            frames = clip.len(),
            "Clip asset stored"
        );

        self.live = Some(Asset {
            id,
            kind: AssetKind::Video,
            square_size,
            path,
            duration: Some(clip.duration()),
        });
        Ok(self.live.as_ref().expect("just stored"))
    }

    /// The live asset, if any
    pub fn live(&self) -> Option<&Asset> {
        self.live.as_ref()
    }

    /// Release the live asset's temporary file; idempotent
    ///
    /// Returns true if an asset was released.
    pub fn release(&mut self) -> bool {
        let Some(asset) = self.live.take() else {
            return false;
        };
        match std::fs::remove_file(&asset.path) {
            Ok(()) => debug!(id = %asset.id, "Asset file released"),
            Err(e) => warn!(id = %asset.id, error = %e, "Failed to remove asset file"),
        }
        true
    }

    /// Copy the live asset into a library directory with a timestamped name
    pub fn export(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let asset = self.live.as_ref().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no live asset to export")
        })?;

        std::fs::create_dir_all(dir)?;
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let extension = asset
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let prefix = match asset.kind {
            AssetKind::Image => "IMG",
            AssetKind::Video => "VID",
        };
        let target = dir.join(format!("{}_{}.{}", prefix, timestamp, extension));
        std::fs::copy(&asset.path, &target)?;

        info!(path = %target.display(), "Asset exported");
        Ok(target)
    }
}

impl Drop for AssetStore {
    fn drop(&mut self) {
        self.release();
    }
}
