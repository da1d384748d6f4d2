//! Click Counter - tray utility counting left and right mouse clicks.
//!
//! Runs silently with a system tray icon. Totals are saved next to the
//! executable every couple of seconds and on quit.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    run()
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("click_counter=info")),
        )
        .init();
}

#[cfg(not(windows))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing::error!("Click Counter needs a Windows desktop (mouse hook and system tray)");
    Err("unsupported platform".into())
}

#[cfg(windows)]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    use click_counter::app::App;
    use click_counter::config::AppConfig;
    use click_counter::instance::InstanceLock;
    use click_counter::monitor::ClickListener;
    use click_counter::tray::{spawn_menu_handler, TrayUi};
    use click_counter::winapi_utils::{run_message_loop, show_warning, UiDispatcher};
    use std::sync::Arc;

    let config = AppConfig::resolve();
    tracing::info!(path = ?config.data_path, "Click Counter starting");

    let Some(_lock) = InstanceLock::acquire(&config.lock_path())? else {
        show_warning(
            "Click Counter - Already Running",
            "Click Counter is already running.\n\nCheck the system tray for its icon.",
        );
        return Ok(());
    };

    let app = Arc::new(App::bootstrap(&config));

    // The tray and every dialog live on this thread
    let (dispatcher, inbox) = UiDispatcher::for_current_thread();
    let mut tray = TrayUi::build(&app.counter().snapshot())?;
    app.attach_ui(Arc::new(dispatcher));
    let menu_handle = spawn_menu_handler(Arc::clone(&app));

    // Handle Ctrl+C as backup
    let app_ctrlc = Arc::clone(&app);
    ctrlc::set_handler(move || {
        tracing::info!("Shutdown signal received");
        app_ctrlc.quit();
    })?;

    let listener = match ClickListener::spawn(Arc::clone(app.counter())) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Cannot count clicks without the mouse hook");
            app.quit();
            return Err(e.into());
        }
    };
    app.attach_listener(Box::new(listener));
    app.start_autosave();
    app.mark_running()?;

    tracing::info!("Running message loop...");
    run_message_loop(|| inbox.drain(|task| tray.handle(task)));

    // Covers a loop ended by something other than Quit
    app.quit();
    drop(inbox);
    if menu_handle.join().is_err() {
        tracing::error!("Menu handler thread panicked");
    }

    tracing::info!("Click Counter has exited");
    Ok(())
}
