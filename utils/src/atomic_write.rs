//! Atomic file writes for saved progress.
//!
//! Writes go to a temp file next to the target and are renamed over it, so a
//! crash mid-save leaves either the old snapshot or the new one. Where rename
//! over an existing file fails, the old file is moved to `.bak` first and put
//! back if the second attempt also fails.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileSyncPolicy {
    /// `fsync` the temp file before it replaces the target.
    #[default]
    SyncAll,
    SkipSync,
}

/// Restore `path` from `path.bak` when a previous save died between the
/// backup rename and the final persist.
pub fn recover_bak_file(path: &Path) {
    let backup = path.with_extension("bak");
    if path.exists() || !backup.exists() {
        return;
    }
    match fs::rename(&backup, path) {
        Ok(()) => tracing::warn!(
            path = %path.display(),
            "Recovered save file from backup after interrupted write"
        ),
        Err(err) => tracing::warn!(
            path = %backup.display(),
            "Failed to restore backup: {err}"
        ),
    }
}

/// Atomically replace `path` with `bytes`, creating parent directories.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    atomic_write_with_policy(path, bytes, FileSyncPolicy::default())
}

pub fn atomic_write_with_policy(
    path: &Path,
    bytes: &[u8],
    sync: FileSyncPolicy,
) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    if sync == FileSyncPolicy::SyncAll {
        tmp.as_file().sync_all()?;
    }

    let Err(err) = tmp.persist(path) else {
        tracing::debug!(path = %path.display(), len = bytes.len(), "Atomic write complete");
        return Ok(());
    };
    if !path.exists() {
        return Err(err.error);
    }

    let backup = path.with_extension("bak");
    let _ = fs::remove_file(&backup);
    fs::rename(path, &backup)?;
    if let Err(retry) = err.file.persist(path) {
        let _ = fs::rename(&backup, path);
        return Err(retry.error);
    }
    if let Err(e) = fs::remove_file(&backup) {
        tracing::warn!(path = %backup.display(), "Failed to remove .bak after atomic write: {e}");
    }
    Ok(())
}
