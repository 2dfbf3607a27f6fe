//! Blocking Dialogs

/// `window.alert`; silently skipped when there is no window
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// `window.confirm`; anything but an explicit OK counts as cancel
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
