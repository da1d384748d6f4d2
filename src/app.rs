//! Application orchestration.
//!
//! [`App`] owns the counters, the store, the shutdown signal and the handles
//! of every background worker. Startup is driven step by step from `main`;
//! the quit sequence lives here so the tray menu and Ctrl+C share it.

use crate::config::AppConfig;
use crate::error::Result;
use crate::lifecycle::{Lifecycle, Phase};
use crate::monitor::{spawn_autosave_thread, AutosaveConfig};
use crate::shutdown::ShutdownSignal;
use crate::store::{ClickStore, CounterState};
use crate::tray::MenuAction;
use crate::ui::{UiShell, RESET_PROMPT, RESET_TITLE};
use chrono::Local;
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

/// A running source of mouse events that can be shut off.
pub trait InputListener: Send {
    /// Unsubscribes from input and ends the listener thread.
    fn stop(&mut self);
}

/// The click counter application.
pub struct App {
    counter: Arc<CounterState>,
    store: Arc<ClickStore>,
    shutdown: Arc<ShutdownSignal>,
    lifecycle: Lifecycle,
    autosave_config: AutosaveConfig,
    ui: OnceCell<Arc<dyn UiShell>>,
    listener: Mutex<Option<Box<dyn InputListener>>>,
    autosave: Mutex<Option<JoinHandle<()>>>,
}

impl App {
    /// Loads the saved record and builds the counters.
    pub fn bootstrap(config: &AppConfig) -> Self {
        let store = ClickStore::new(&config.data_path);
        let record = store.load();
        let counter = CounterState::from_record(record, Local::now().naive_local());

        Self {
            counter: Arc::new(counter),
            store: Arc::new(store),
            shutdown: Arc::new(ShutdownSignal::new()),
            lifecycle: Lifecycle::new(),
            autosave_config: config.autosave.clone(),
            ui: OnceCell::new(),
            listener: Mutex::new(None),
            autosave: Mutex::new(None),
        }
    }

    pub fn counter(&self) -> &Arc<CounterState> {
        &self.counter
    }

    pub fn store(&self) -> &ClickStore {
        &self.store
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_raised()
    }

    /// Connects the UI and routes counter refreshes to it.
    pub fn attach_ui<U: UiShell + 'static>(&self, ui: Arc<U>) {
        let shell: Arc<dyn UiShell> = ui.clone();
        if self.ui.set(shell).is_err() {
            tracing::warn!("UI already attached, ignoring");
            return;
        }
        self.counter.set_view(ui);
    }

    /// Takes ownership of the started input listener.
    pub fn attach_listener(&self, listener: Box<dyn InputListener>) {
        *self.listener.lock().unwrap_or_else(PoisonError::into_inner) = Some(listener);
    }

    /// Starts the autosave thread.
    pub fn start_autosave(&self) {
        let handle = spawn_autosave_thread(
            Arc::clone(&self.counter),
            Arc::clone(&self.store),
            Arc::clone(&self.shutdown),
            self.autosave_config.clone(),
        );
        *self.autosave.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    pub fn mark_running(&self) -> Result<()> {
        self.lifecycle.mark_running()?;
        tracing::info!("Click counter running");
        Ok(())
    }

    /// Dispatches a tray menu action.
    pub fn handle_menu(&self, action: MenuAction) {
        match action {
            MenuAction::Reset => {
                self.confirm_and_reset();
            }
            MenuAction::Quit => {
                tracing::info!("Quit requested from tray menu");
                self.quit();
            }
        }
    }

    /// Asks the user to confirm, then zeroes the counters.
    ///
    /// Without a UI there is nobody to confirm, so nothing is reset.
    pub fn confirm_and_reset(&self) -> bool {
        let confirmed = self
            .ui
            .get()
            .is_some_and(|ui| ui.confirm(RESET_TITLE, RESET_PROMPT));

        if confirmed {
            self.counter.reset();
        } else {
            tracing::info!("Reset cancelled");
        }
        confirmed
    }

    /// Runs the shutdown sequence. Later calls are no-ops.
    ///
    /// Stops the listener and autosave thread, writes the record one last
    /// time whether or not it is dirty, then tears down the UI.
    pub fn quit(&self) {
        if !self.lifecycle.begin_stopping() {
            return;
        }
        tracing::info!("Shutting down");

        self.shutdown.raise();

        if let Some(mut listener) = self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            listener.stop();
        }

        let autosave = self
            .autosave
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = autosave {
            if handle.join().is_err() {
                tracing::error!("Autosave thread panicked");
            }
        }

        self.final_flush();

        if let Some(ui) = self.ui.get() {
            ui.exit();
        }

        if let Err(e) = self.lifecycle.mark_stopped() {
            tracing::error!(error = %e, "Unexpected lifecycle state at shutdown");
        }
    }

    fn final_flush(&self) {
        let (record, version) = self.counter.current();
        match self.store.save(&record) {
            Ok(()) => {
                self.counter.mark_clean(version);
                tracing::info!(left = record.left, right = record.right, "Final clicks saved");
            }
            Err(e) => tracing::error!(error = %e, "Failed to save clicks at shutdown"),
        }
    }
}
