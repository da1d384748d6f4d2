//! Error type shared across the crate.

use crate::lifecycle::Phase;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the click counter.
///
/// Loading persisted state never produces one of these: a missing or corrupt
/// file silently yields zeroed counters.
#[derive(Debug, Error)]
pub enum AppError {
    /// A file system I/O error occurred while writing the click record.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The click record could not be serialized.
    #[error("failed to serialize click record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The low-level mouse hook could not be installed.
    #[cfg(windows)]
    #[error("failed to install mouse hook: {0}")]
    Hook(#[from] windows::core::Error),

    /// The listener thread went away before reporting its hook status.
    #[error("input listener thread exited during startup")]
    ListenerExited,

    /// The tray icon could not be created.
    #[cfg(windows)]
    #[error("failed to create tray icon: {0}")]
    Tray(#[from] tray_icon::Error),

    /// The tray icon image was rejected.
    #[cfg(windows)]
    #[error("invalid tray icon image: {0}")]
    Icon(#[from] tray_icon::BadIcon),

    /// A lifecycle transition was requested out of order.
    #[error("invalid lifecycle transition from {from:?} to {to:?}")]
    Transition { from: Phase, to: Phase },
}

impl AppError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
