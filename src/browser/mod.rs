//! Browser Wrappers
//!
//! Thin bindings to window APIs the pages need, organized by concern.
//! Failures come back as strings for logging; none of them are fatal.

mod dialog;
mod download;
mod page;
mod share;

use wasm_bindgen::JsValue;

/// Render a thrown JS value for logs
fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "no window".to_string())
}

fn document() -> Result<web_sys::Document, String> {
    window()?.document().ok_or_else(|| "no document".to_string())
}

// Re-export all public items
pub use dialog::*;
pub use download::*;
pub use page::*;
pub use share::*;
