//! File Download
//!
//! Client-side file save through an object URL and a hidden anchor.

use wasm_bindgen::{JsCast, JsValue};

use super::{document, js_error};

/// Offer `contents` as a file named `filename`
pub fn download_text(contents: &str, filename: &str, mime: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let result = click_link(&url, filename);
    let _ = web_sys::Url::revoke_object_url(&url);
    result
}

fn click_link(href: &str, filename: &str) -> Result<(), String> {
    let document = document()?;
    let body = document.body().ok_or_else(|| "no body".to_string())?;
    let link = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "anchor element expected".to_string())?;

    link.set_href(href);
    link.set_download(filename);
    link.style().set_property("visibility", "hidden").map_err(js_error)?;
    body.append_child(&link).map_err(js_error)?;
    link.click();
    link.remove();
    Ok(())
}
