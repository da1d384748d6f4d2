//! Windows hook installation and management.
//!
//! Provides an RAII wrapper for the low-level mouse hook to ensure proper
//! cleanup when the hook goes out of scope.

use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, SetWindowsHookExW, UnhookWindowsHookEx, HHOOK, HOOKPROC, WH_MOUSE_LL,
};

/// RAII guard for a Windows hook.
///
/// Automatically calls `UnhookWindowsHookEx` when dropped to prevent
/// hook leaks and ensure proper cleanup.
///
/// # Example
/// ```ignore
/// {
///     let guard = HookGuard::install_mouse_hook(Some(my_callback))?;
///     // ... hook is active while this thread pumps messages ...
/// } // UnhookWindowsHookEx called here
/// ```
pub struct HookGuard {
    handle: HHOOK,
    hook_type: &'static str,
}

impl HookGuard {
    fn new(handle: HHOOK, hook_type: &'static str) -> Self {
        tracing::info!(hook_type, "Hook installed successfully");
        Self { handle, hook_type }
    }

    /// Installs a low-level mouse hook.
    ///
    /// # Important
    /// - The callback runs on the installing thread, inside its message pump
    /// - The callback must be fast; Windows silently drops slow hooks
    /// - Always call `CallNextHookEx` at the end of the callback
    pub fn install_mouse_hook(callback: HOOKPROC) -> windows::core::Result<Self> {
        let handle = unsafe { SetWindowsHookExW(WH_MOUSE_LL, callback, None, 0)? };
        Ok(Self::new(handle, "mouse_ll"))
    }
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        let result = unsafe { UnhookWindowsHookEx(self.handle) };
        match result {
            Ok(_) => tracing::info!(hook_type = self.hook_type, "Hook uninstalled successfully"),
            Err(e) => tracing::error!(
                hook_type = self.hook_type,
                error = ?e,
                "Failed to unhook"
            ),
        }
    }
}

/// Calls the next hook in the hook chain.
///
/// This must be called at the end of every hook callback so other
/// applications keep receiving the event.
#[inline(always)]
pub fn call_next_hook(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}
