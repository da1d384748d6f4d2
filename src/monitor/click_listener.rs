//! Low-level mouse hook feeding the click counters.
//!
//! The hook is installed on a dedicated thread that pumps its own messages,
//! so the callback never competes with the tray UI. The callback executes
//! synchronously in the Windows input pipeline and must stay short: it
//! classifies the message and takes the counter lock once.

use crate::app::InputListener;
use crate::error::{AppError, Result};
use crate::store::{CounterState, MouseButton};
use crate::winapi_utils::{
    call_next_hook, current_thread_id, ensure_message_queue, post_thread_quit, run_message_loop,
    HookGuard,
};
use std::cell::RefCell;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    HC_ACTION, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP, WM_RBUTTONDOWN,
    WM_RBUTTONUP, WM_XBUTTONDOWN, WM_XBUTTONUP,
};

thread_local! {
    /// Counters the hook on this thread reports to.
    static CLICK_SINK: RefCell<Option<Arc<CounterState>>> = const { RefCell::new(None) };
}

/// Maps a mouse hook message to `(button, pressed)`.
///
/// Movement and wheel messages yield `None`.
pub fn classify_mouse_message(msg: u32) -> Option<(MouseButton, bool)> {
    match msg {
        WM_LBUTTONDOWN => Some((MouseButton::Left, true)),
        WM_LBUTTONUP => Some((MouseButton::Left, false)),
        WM_RBUTTONDOWN => Some((MouseButton::Right, true)),
        WM_RBUTTONUP => Some((MouseButton::Right, false)),
        WM_MBUTTONDOWN => Some((MouseButton::Middle, true)),
        WM_MBUTTONUP => Some((MouseButton::Middle, false)),
        WM_XBUTTONDOWN => Some((MouseButton::Other, true)),
        WM_XBUTTONUP => Some((MouseButton::Other, false)),
        _ => None,
    }
}

/// Low-level mouse hook callback.
///
/// # Safety
/// Called by Windows from the listener thread's message pump.
unsafe extern "system" fn mouse_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION as i32 {
        if let Some((button, pressed)) = classify_mouse_message(wparam.0 as u32) {
            CLICK_SINK.with_borrow(|sink| {
                if let Some(counter) = sink {
                    counter.on_button_event(button, pressed);
                }
            });
        }
    }

    // CRITICAL: Always call next hook in chain
    call_next_hook(code, wparam, lparam)
}

/// Running mouse listener thread.
pub struct ClickListener {
    thread_id: u32,
    handle: Option<JoinHandle<()>>,
}

impl ClickListener {
    /// Spawns the listener thread and installs the hook on it.
    ///
    /// Returns once the hook is live, or with the install error.
    pub fn spawn(counter: Arc<CounterState>) -> Result<Self> {
        let (ready_tx, ready_rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            CLICK_SINK.set(Some(counter));

            let _hook = match HookGuard::install_mouse_hook(Some(mouse_hook_proc)) {
                Ok(hook) => hook,
                Err(e) => {
                    let _ = ready_tx.send(Err(AppError::from(e)));
                    return;
                }
            };
            ensure_message_queue();
            let _ = ready_tx.send(Ok(current_thread_id()));

            tracing::info!("Mouse listener running");
            run_message_loop(|| {});
            tracing::info!("Mouse listener shutting down");

            CLICK_SINK.set(None);
        });

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => Ok(Self {
                thread_id,
                handle: Some(handle),
            }),
            Ok(Err(e)) => {
                let _ = handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = handle.join();
                Err(AppError::ListenerExited)
            }
        }
    }
}

impl InputListener for ClickListener {
    fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        post_thread_quit(self.thread_id);
        if handle.join().is_err() {
            tracing::error!("Mouse listener thread panicked");
        }
    }
}

impl Drop for ClickListener {
    fn drop(&mut self) {
        self.stop();
    }
}
