//! Share and Clipboard
//!
//! `navigator.share` and `navigator.clipboard` are looked up at runtime so
//! browsers without them fall through to the next option.

use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{document, js_error, window};

#[derive(Debug, Clone, Serialize)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareData {
    /// Text placed on the clipboard when the share sheet is unavailable
    pub fn clipboard_text(&self) -> String {
        format!("{}\n\n{}", self.text, self.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the platform share sheet
    Shared,
    /// Written through the async clipboard API
    CopiedLink,
    /// Copied with the legacy textarea fallback
    CopiedText,
}

/// Look up `target[name]` as a callable
fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|value| value.is_function())
        .map(|value| value.unchecked_into())
}

async fn call_async(target: &JsValue, function: &Function, arg: &JsValue) -> Result<JsValue, String> {
    let promise: Promise = function.call1(target, arg).map_err(js_error)?.dyn_into().map_err(js_error)?;
    JsFuture::from(promise).await.map_err(js_error)
}

/// Share through the platform sheet when present, else copy to the clipboard
pub async fn share_or_copy(data: &ShareData) -> Result<ShareOutcome, String> {
    let navigator: JsValue = window()?.navigator().into();

    if let Some(share) = method(&navigator, "share") {
        let payload = serde_wasm_bindgen::to_value(data).map_err(|e| e.to_string())?;
        call_async(&navigator, &share, &payload).await?;
        return Ok(ShareOutcome::Shared);
    }

    let text = data.clipboard_text();
    match copy_with_clipboard_api(&navigator, &text).await {
        Ok(()) => Ok(ShareOutcome::CopiedLink),
        Err(e) => {
            log::debug!("[SHARE] clipboard API unavailable ({}), using textarea", e);
            copy_with_textarea(&text)?;
            Ok(ShareOutcome::CopiedText)
        }
    }
}

async fn copy_with_clipboard_api(navigator: &JsValue, text: &str) -> Result<(), String> {
    let clipboard = Reflect::get(navigator, &JsValue::from_str("clipboard")).map_err(js_error)?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err("no clipboard".to_string());
    }
    let write_text = method(&clipboard, "writeText").ok_or_else(|| "no writeText".to_string())?;
    call_async(&clipboard, &write_text, &JsValue::from_str(text)).await?;
    Ok(())
}

fn copy_with_textarea(text: &str) -> Result<(), String> {
    let document = document()?;
    let body = document.body().ok_or_else(|| "no body".to_string())?;
    let textarea = document
        .create_element("textarea")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlTextAreaElement>()
        .map_err(|_| "textarea element expected".to_string())?;

    textarea.set_value(text);
    body.append_child(&textarea).map_err(js_error)?;
    textarea.select();
    let copied = document
        .dyn_into::<web_sys::HtmlDocument>()
        .map_err(|_| "not an HTML document".to_string())
        .and_then(|html| html.exec_command("copy").map_err(js_error));
    textarea.remove();

    match copied? {
        true => Ok(()),
        false => Err("copy command rejected".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_text_puts_url_after_blank_line() {
        let data = ShareData {
            title: "AidConnect".into(),
            text: "Help Needed!".into(),
            url: "https://relief.example/donor.html".into(),
        };
        assert_eq!(data.clipboard_text(), "Help Needed!\n\nhttps://relief.example/donor.html");
    }
}
