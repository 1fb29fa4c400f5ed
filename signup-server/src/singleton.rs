//! Single-instance guard so only one server writes a given activities file.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A lock guard that releases the lock when dropped
pub struct LockGuard {
    _file: File,
}

/// `data/activities.json` is guarded by `data/activities.json.lock`.
pub fn lock_path(data_path: &Path) -> PathBuf {
    let mut name = data_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "activities".into());
    name.push(".lock");
    data_path.with_file_name(name)
}

/// Acquire an exclusive lock for `data_path`, failing if another instance holds it
pub fn acquire_lock(data_path: &Path) -> Result<LockGuard> {
    let path = lock_path(data_path);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
    }

    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another signup-server instance is already using {}.\n\
            If you believe this is an error, remove: {}",
            data_path.display(),
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}
