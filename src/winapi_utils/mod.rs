//! Safe wrappers around Windows API calls.
//!
//! This module provides safe Rust abstractions over unsafe WinAPI functions
//! for the mouse hook, the message loop, modal dialogs and process checks.

pub mod dialog;
pub mod hooks;
pub mod message_loop;
pub mod process;

pub use dialog::*;
pub use hooks::*;
pub use message_loop::*;
pub use process::*;
