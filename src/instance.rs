//! Single-instance guard.
//!
//! A lock file holding the owner's PID sits next to the data file. A second
//! instance finding a live PID there backs off; a stale file is replaced.

use crate::error::{AppError, Result};
use crate::winapi_utils::is_process_running;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// RAII guard deleting the lock file on drop.
#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
}

impl InstanceLock {
    /// Claims the lock. Returns `Ok(None)` if another live instance holds it.
    pub fn acquire(path: &Path) -> Result<Option<Self>> {
        if let Some(pid) = read_pid(path) {
            if pid != std::process::id() && is_process_running(pid) {
                tracing::warn!(pid, "Another instance is already running");
                return Ok(None);
            }
            tracing::info!(pid, "Removing stale lock file");
        }
        let _ = fs::remove_file(path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| AppError::io(path, e))?;
        write!(file, "{}", std::process::id()).map_err(|e| AppError::io(path, e))?;

        Ok(Some(Self {
            path: path.to_path_buf(),
        }))
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn read_pid(path: &Path) -> Option<u32> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}
