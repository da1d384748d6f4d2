//! Application lifecycle phases.

use crate::error::{AppError, Result};
use std::sync::{Mutex, PoisonError};

/// Where the application is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// Thread-safe phase tracker enforcing `Starting -> Running -> Stopping -> Stopped`.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Mutex<Phase>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::Starting),
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `Starting -> Running`.
    pub fn mark_running(&self) -> Result<()> {
        self.transition(&[Phase::Starting], Phase::Running)
    }

    /// Enters `Stopping`. Returns `false` if shutdown already began.
    ///
    /// Allowed from `Starting` so a failed startup can still be unwound.
    pub fn begin_stopping(&self) -> bool {
        self.transition(&[Phase::Starting, Phase::Running], Phase::Stopping)
            .is_ok()
    }

    /// `Stopping -> Stopped`.
    pub fn mark_stopped(&self) -> Result<()> {
        self.transition(&[Phase::Stopping], Phase::Stopped)
    }

    fn transition(&self, from: &[Phase], to: Phase) -> Result<()> {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if !from.contains(&phase) {
            return Err(AppError::Transition { from: *phase, to });
        }
        tracing::debug!(from = ?*phase, to = ?to, "Lifecycle transition");
        *phase = to;
        Ok(())
    }
}
