//! System tray module.
//!
//! Shows the click totals in the tray icon tooltip and menu, and turns menu
//! picks into [`MenuAction`]s for the application.

pub mod action;
#[cfg(windows)]
pub mod icon;
#[cfg(windows)]
pub mod menu;
#[cfg(windows)]
pub mod tray_ui;

pub use action::*;
#[cfg(windows)]
pub use icon::*;
#[cfg(windows)]
pub use menu::*;
#[cfg(windows)]
pub use tray_ui::*;
