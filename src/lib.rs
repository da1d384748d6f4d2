//! Click Counter - system-wide left/right mouse click tally.
//!
//! Counts clicks through a low-level mouse hook, shows the running totals in
//! a tray icon tooltip and menu, and periodically persists them next to the
//! executable so they survive restarts.

pub mod app;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod monitor;
pub mod shutdown;
pub mod store;
pub mod tray;
pub mod ui;

#[cfg(windows)]
pub mod instance;
#[cfg(windows)]
pub mod winapi_utils;

pub use error::{AppError, Result};
