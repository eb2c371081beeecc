//! Saved progress on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use mathmaster_types::PlayerProgress;
use mathmaster_utils::{atomic_write, recover_bak_file};

/// JSON snapshot of one player's [`PlayerProgress`].
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved snapshot, or `None` when there is nothing usable.
    ///
    /// A corrupt file is logged and treated as absent; the next save
    /// overwrites it.
    pub fn load(&self) -> Option<PlayerProgress> {
        recover_bak_file(&self.path);
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "Failed to read saved progress: {err}");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(progress) => Some(progress),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "Ignoring corrupt saved progress: {err}");
                None
            }
        }
    }

    pub fn save(&self, progress: &PlayerProgress) -> Result<()> {
        let json = serde_json::to_vec_pretty(progress).context("serialize progress")?;
        atomic_write(&self.path, &json)
            .with_context(|| format!("write progress to {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "Progress saved");
        Ok(())
    }

    /// Delete the snapshot. Missing files are fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("remove progress at {}", self.path.display()))
            }
        }
    }
}
