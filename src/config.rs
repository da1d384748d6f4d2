//! Runtime configuration.
//!
//! Nothing here is user-configurable: the data file always lives next to the
//! executable and the autosave cadence is fixed. The struct exists so tests
//! can point the application at a temporary directory.

use crate::monitor::AutosaveConfig;
use std::path::{Path, PathBuf};

/// File name of the persisted click record.
pub const DATA_FILE_NAME: &str = "clicks.json";

/// File name of the single-instance lock.
pub const LOCK_FILE_NAME: &str = "click-counter.lock";

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the click record is persisted.
    pub data_path: PathBuf,

    /// Autosave loop settings.
    pub autosave: AutosaveConfig,
}

impl AppConfig {
    /// Resolves the configuration for the running executable.
    pub fn resolve() -> Self {
        Self::with_data_path(default_data_path())
    }

    /// Builds a configuration around an explicit data file path.
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            autosave: AutosaveConfig::default(),
        }
    }

    /// Lock file path, kept beside the data file.
    pub fn lock_path(&self) -> PathBuf {
        self.data_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(LOCK_FILE_NAME)
    }
}

/// Returns `clicks.json` next to the executable.
///
/// Falls back to the local data directory, then the working directory, when
/// the executable location cannot be determined.
pub fn default_data_path() -> PathBuf {
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        return dir.join(DATA_FILE_NAME);
    }

    tracing::warn!("Executable location unknown, falling back to data directory");
    dirs::data_local_dir()
        .map(|dir| dir.join("click-counter"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_FILE_NAME)
}
