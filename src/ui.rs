//! Seams between the counter and whatever presents it.
//!
//! The Windows build implements these with the tray icon and a message-loop
//! dispatcher; tests implement them in-process.

use crate::store::ClickRecord;
use std::sync::mpsc::SyncSender;

/// Title of the reset confirmation dialog.
pub const RESET_TITLE: &str = "Reset Click Counter";

/// Body of the reset confirmation dialog.
pub const RESET_PROMPT: &str = "Reset left and right click counts to zero?";

/// Receives a fresh snapshot whenever the counters change.
pub trait StatsView: Send + Sync {
    /// Called with the counter lock held. Must not block.
    fn refresh(&self, snapshot: &ClickRecord);
}

/// The UI side of the application: stats view plus modal prompts and exit.
pub trait UiShell: StatsView {
    /// Shows a modal OK/Cancel prompt on the UI thread and waits for the answer.
    ///
    /// Returns `false` when the UI can no longer answer.
    fn confirm(&self, title: &str, message: &str) -> bool;

    /// Removes the tray icon and asks the UI event loop to exit.
    fn exit(&self);
}

/// Work scheduled onto the UI thread.
pub enum UiTask {
    /// Repaint the tooltip and menu label.
    Refresh(ClickRecord),

    /// Show a modal OK/Cancel dialog and send back the choice.
    Confirm {
        title: String,
        message: String,
        reply: SyncSender<bool>,
    },

    /// Tear down the tray icon and leave the event loop.
    Exit,
}

impl std::fmt::Debug for UiTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Refresh(record) => f.debug_tuple("Refresh").field(record).finish(),
            Self::Confirm { title, .. } => f.debug_struct("Confirm").field("title", title).finish(),
            Self::Exit => f.write_str("Exit"),
        }
    }
}
