//! Archival of handled files
//!
//! After a file has been handled it is moved into `processed` or `failed`
//! beneath the watch directory, and that subdirectory is swept of files older
//! than the cleanup threshold.

use crate::io::filename::display_name;
use crate::types::WatcherError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

/// Terminal state of a handled file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Processed,
    Failed,
}

impl Disposition {
    /// Name of the subdirectory files with this disposition are moved into
    pub fn dir_name(&self) -> &'static str {
        match self {
            Disposition::Processed => "processed",
            Disposition::Failed => "failed",
        }
    }

    /// Subdirectory path beneath the watch directory
    pub fn dir_in(&self, watch_dir: &Path) -> PathBuf {
        watch_dir.join(self.dir_name())
    }
}

/// Move a file into its disposition directory, creating it if absent
///
/// Returns the new path of the file.
pub fn move_to(
    watch_dir: &Path,
    path: &Path,
    disposition: Disposition,
) -> Result<PathBuf, WatcherError> {
    let target_dir = disposition.dir_in(watch_dir);
    fs::create_dir_all(&target_dir).map_err(|e| WatcherError::Io {
        message: format!("Failed to create {}: {}", target_dir.display(), e),
    })?;

    let file_name = path.file_name().ok_or_else(|| WatcherError::Io {
        message: format!("{} has no file name", path.display()),
    })?;
    let target = target_dir.join(file_name);

    fs::rename(path, &target).map_err(|e| WatcherError::Io {
        message: format!(
            "Failed to move {} to {}: {}",
            path.display(),
            target_dir.display(),
            e
        ),
    })?;

    info!("Moved {} to {}", display_name(path), target_dir.display());
    Ok(target)
}

/// Delete every regular file in `dir` older than `threshold`
///
/// Age is measured from the last-modified time to `now`; a file is deleted only
/// when its age is strictly greater than the threshold. Errors on individual
/// files are logged and skipped. Returns the deleted paths.
pub fn sweep(dir: &Path, threshold: Duration, now: SystemTime) -> Result<Vec<PathBuf>, WatcherError> {
    let entries = fs::read_dir(dir).map_err(|e| WatcherError::Io {
        message: format!("Failed to read {}: {}", dir.display(), e),
    })?;

    let mut deleted = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let modified = match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => metadata.modified(),
            Ok(_) => continue,
            Err(e) => Err(e),
        };
        let age = match modified {
            // Modification times in the future count as age zero
            Ok(modified) => now.duration_since(modified).unwrap_or(Duration::ZERO),
            Err(e) => {
                warn!("Could not read modification time of {}: {}", path.display(), e);
                continue;
            }
        };

        if age > threshold {
            match fs::remove_file(&path) {
                Ok(()) => {
                    info!("Cleaned up old file: {}", display_name(&path));
                    deleted.push(path);
                }
                Err(e) => warn!("Failed to delete {}: {}", path.display(), e),
            }
        }
    }

    Ok(deleted)
}

/// Move a handled file and sweep the directory it landed in
///
/// Move and sweep failures are logged and returned; they never panic.
pub fn archive(
    watch_dir: &Path,
    path: &Path,
    disposition: Disposition,
    threshold: Duration,
) -> Result<PathBuf, WatcherError> {
    let target = move_to(watch_dir, path, disposition)?;
    if let Err(e) = sweep(&disposition.dir_in(watch_dir), threshold, SystemTime::now()) {
        warn!("Cleanup of {} failed: {}", disposition.dir_name(), e);
    }
    Ok(target)
}
