//! Modal message boxes.

use windows::core::HSTRING;
use windows::Win32::UI::WindowsAndMessaging::{
    MessageBoxW, IDOK, MB_ICONQUESTION, MB_ICONWARNING, MB_OK, MB_OKCANCEL, MB_SETFOREGROUND,
    MB_TOPMOST,
};

/// Shows a topmost OK/Cancel box. Returns `true` on OK.
///
/// There is no visible owner window, so the box forces itself to the
/// foreground. Blocks the calling thread until the user answers.
pub fn confirm_dialog(title: &str, message: &str) -> bool {
    let result = unsafe {
        MessageBoxW(
            None,
            &HSTRING::from(message),
            &HSTRING::from(title),
            MB_OKCANCEL | MB_ICONQUESTION | MB_TOPMOST | MB_SETFOREGROUND,
        )
    };
    result == IDOK
}

/// Shows a topmost warning box with a single OK button.
pub fn show_warning(title: &str, message: &str) {
    unsafe {
        MessageBoxW(
            None,
            &HSTRING::from(message),
            &HSTRING::from(title),
            MB_OK | MB_ICONWARNING | MB_TOPMOST,
        );
    }
}
