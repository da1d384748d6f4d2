//! Click capture and persistence workers.
//!
//! This module contains the low-level mouse listener and the autosave loop
//! that keeps the click record on disk.

pub mod autosave;
#[cfg(windows)]
pub mod click_listener;

pub use autosave::*;
#[cfg(windows)]
pub use click_listener::*;
