//! Windows message loop utilities.
//!
//! Provides the message pump that hosts the tray icon and the low-level
//! hook, plus [`UiDispatcher`], which lets other threads schedule work onto
//! the UI thread and wait for its result.

use crate::store::ClickRecord;
use crate::ui::{StatsView, UiShell, UiTask};
use crate::winapi_utils::confirm_dialog;
use std::sync::mpsc::{self, Receiver, Sender};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, PeekMessageW, PostQuitMessage, PostThreadMessageW,
    TranslateMessage, MSG, PM_NOREMOVE, WM_APP, WM_QUIT, WM_USER,
};

/// Thread message telling the UI loop to drain its task queue.
const WM_UI_WAKE: u32 = WM_APP + 1;

/// Returns the calling thread's Win32 ID.
pub fn current_thread_id() -> u32 {
    unsafe { GetCurrentThreadId() }
}

/// Makes sure the calling thread has a message queue.
///
/// Thread messages posted before the queue exists are lost, so call this
/// before handing the thread ID to anyone.
pub fn ensure_message_queue() {
    let mut msg = MSG::default();
    unsafe {
        let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);
    }
}

/// Runs the Windows message loop until a WM_QUIT message is received.
///
/// `on_wake` is called on this thread whenever a [`UiDispatcher`] posts
/// work. Every other message is translated and dispatched as usual.
///
/// # Important
/// - Low-level hooks (`WH_MOUSE_LL`) require a message loop on the thread
///   that installed them.
/// - If this loop is blocked or too slow, Windows will unhook the hooks.
pub fn run_message_loop(mut on_wake: impl FnMut()) {
    tracing::debug!(thread_id = current_thread_id(), "Message loop starting");

    let mut msg = MSG::default();

    unsafe {
        // GetMessageW returns:
        // - Positive: message retrieved
        // - 0: WM_QUIT received
        // - -1: error occurred
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            if msg.message == WM_UI_WAKE && msg.hwnd.0.is_null() {
                on_wake();
                continue;
            }
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    tracing::debug!("Message loop exited");
}

/// Ends the message loop running on the calling thread.
pub fn post_quit_message(exit_code: i32) {
    unsafe { PostQuitMessage(exit_code) };
}

/// Posts WM_QUIT to another thread's message loop.
pub fn post_thread_quit(thread_id: u32) {
    post_thread_message(thread_id, WM_QUIT);
}

fn post_thread_message(thread_id: u32, message: u32) -> bool {
    let result = unsafe { PostThreadMessageW(thread_id, message, WPARAM(0), LPARAM(0)) };
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(?e, thread_id, message, "Failed to post thread message");
            false
        }
    }
}

/// Handle for scheduling [`UiTask`]s onto the UI thread.
///
/// Create it on the thread that will run [`run_message_loop`], then pass
/// clones to any thread that needs the UI.
#[derive(Clone)]
pub struct UiDispatcher {
    thread_id: u32,
    tx: Sender<UiTask>,
}

/// Receiving end of a [`UiDispatcher`], drained on the UI thread.
pub struct UiInbox {
    rx: Receiver<UiTask>,
}

impl UiInbox {
    /// Runs `handle` on every queued task.
    pub fn drain(&self, mut handle: impl FnMut(UiTask)) {
        while let Ok(task) = self.rx.try_recv() {
            handle(task);
        }
    }
}

impl UiDispatcher {
    /// Binds a dispatcher to the calling thread.
    pub fn for_current_thread() -> (Self, UiInbox) {
        let (tx, rx) = mpsc::channel();
        let dispatcher = Self {
            thread_id: current_thread_id(),
            tx,
        };
        (dispatcher, UiInbox { rx })
    }

    fn on_ui_thread(&self) -> bool {
        current_thread_id() == self.thread_id
    }

    /// Queues `task` and wakes the UI loop. Returns `false` if the UI is gone.
    pub fn post(&self, task: UiTask) -> bool {
        if self.tx.send(task).is_err() {
            tracing::debug!("UI inbox closed, dropping task");
            return false;
        }
        // A wake lost while a modal dialog owns the pump is harmless: the
        // queue is drained completely on the next one.
        post_thread_message(self.thread_id, WM_UI_WAKE)
    }
}

impl StatsView for UiDispatcher {
    fn refresh(&self, snapshot: &ClickRecord) {
        self.post(UiTask::Refresh(snapshot.clone()));
    }
}

impl UiShell for UiDispatcher {
    fn confirm(&self, title: &str, message: &str) -> bool {
        if self.on_ui_thread() {
            return confirm_dialog(title, message);
        }

        let (reply, answer) = mpsc::sync_channel(1);
        let task = UiTask::Confirm {
            title: title.to_string(),
            message: message.to_string(),
            reply,
        };
        if !self.post(task) {
            return false;
        }
        // Dropped unanswered when the UI loop shuts down first.
        answer.recv().unwrap_or(false)
    }

    fn exit(&self) {
        self.post(UiTask::Exit);
    }
}
