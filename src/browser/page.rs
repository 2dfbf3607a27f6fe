//! Page Location and Events

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{document, js_error, window};

// ========================
// Location
// ========================

/// `window.location.origin`, empty when unavailable
pub fn origin() -> String {
    window()
        .and_then(|w| w.location().origin().map_err(js_error))
        .unwrap_or_default()
}

pub fn pathname() -> String {
    window()
        .and_then(|w| w.location().pathname().map_err(js_error))
        .unwrap_or_default()
}

/// Navigate the current tab, e.g. to a `tel:` link
pub fn navigate(url: &str) -> Result<(), String> {
    window()?.location().set_href(url).map_err(js_error)
}

pub fn open_in_new_tab(url: &str) -> Result<(), String> {
    window()?
        .open_with_url_and_target(url, "_blank")
        .map(|_| ())
        .map_err(js_error)
}

pub fn scroll_into_view(element_id: &str) {
    let Some(element) = document().ok().and_then(|d| d.get_element_by_id(element_id)) else {
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

// ========================
// Visibility
// ========================

/// `visibilitychange` subscription; the listener is removed on drop
pub struct VisibilityListener {
    document: web_sys::Document,
    callback: Closure<dyn FnMut()>,
}

impl Drop for VisibilityListener {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("visibilitychange", self.callback.as_ref().unchecked_ref());
    }
}

/// Run `on_visible` each time the tab becomes visible again
pub fn on_tab_visible(mut on_visible: impl FnMut() + 'static) -> Result<VisibilityListener, String> {
    let document = document()?;
    let watched = document.clone();
    let callback = Closure::<dyn FnMut()>::new(move || {
        if !watched.hidden() {
            on_visible();
        }
    });
    document
        .add_event_listener_with_callback("visibilitychange", callback.as_ref().unchecked_ref())
        .map_err(js_error)?;
    Ok(VisibilityListener { document, callback })
}
