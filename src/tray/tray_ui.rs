//! Tray icon owned by the UI thread, and the menu event handler.

use crate::app::App;
use crate::error::Result;
use crate::store::ClickRecord;
use crate::tray::{create_default_icon, create_tray_menu, MenuAction};
use crate::ui::UiTask;
use crate::winapi_utils::{confirm_dialog, post_quit_message};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tray_icon::menu::{MenuEvent, MenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};

/// The tray icon plus the menu label it keeps current.
///
/// Lives on the UI thread; other threads reach it through [`UiTask`]s.
pub struct TrayUi {
    tray: Option<TrayIcon>,
    stats: MenuItem,
}

impl TrayUi {
    /// Builds and shows the tray icon for `snapshot`.
    pub fn build(snapshot: &ClickRecord) -> Result<Self> {
        let icon = create_default_icon()?;
        let menu = create_tray_menu(snapshot);

        let tray = TrayIconBuilder::new()
            .with_tooltip(snapshot.tooltip_text())
            .with_icon(icon)
            .with_menu(Box::new(menu.menu))
            .build()?;

        tracing::info!("System tray initialized");
        Ok(Self {
            tray: Some(tray),
            stats: menu.stats,
        })
    }

    /// Runs one scheduled task. Must be called on the UI thread.
    pub fn handle(&mut self, task: UiTask) {
        match task {
            UiTask::Refresh(snapshot) => self.refresh(&snapshot),
            UiTask::Confirm {
                title,
                message,
                reply,
            } => {
                let confirmed = confirm_dialog(&title, &message);
                let _ = reply.send(confirmed);
            }
            UiTask::Exit => {
                if self.tray.take().is_some() {
                    tracing::info!("System tray removed");
                }
                post_quit_message(0);
            }
        }
    }

    fn refresh(&self, snapshot: &ClickRecord) {
        let Some(tray) = &self.tray else {
            return;
        };
        if let Err(e) = tray.set_tooltip(Some(snapshot.tooltip_text())) {
            tracing::warn!(error = %e, "Failed to update tray tooltip");
        }
        self.stats.set_text(snapshot.menu_label());
    }
}

/// Spawns a thread to handle menu events.
///
/// The thread ends once the application starts shutting down.
pub fn spawn_menu_handler(app: Arc<App>) -> JoinHandle<()> {
    thread::spawn(move || {
        let receiver = MenuEvent::receiver();

        while !app.is_shutting_down() {
            let Ok(event) = receiver.recv_timeout(Duration::from_millis(100)) else {
                continue;
            };
            match MenuAction::from_id(&event.id.0) {
                Some(action) => app.handle_menu(action),
                None => tracing::debug!(menu_id = %event.id.0, "Ignoring menu event"),
            }
        }
    })
}
