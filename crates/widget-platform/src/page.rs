//! Hosting page helpers.

/// `window.location.pathname`, or "/" outside a browser window.
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}
