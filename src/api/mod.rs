//! REST API Client
//!
//! Frontend bindings to the relief backend, organized by page.

mod dashboard;
mod donor;
mod volunteer;

use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

// Re-export all public items
pub use dashboard::*;
pub use donor::*;
pub use volunteer::*;

/// Shared HTTP client bound to the API origin
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, &body)
    }
}

/// Headers asking every cache between us and the backend to stay out of the way
pub fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store, must-revalidate"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    headers
}

/// Decode a `{success, error?, ...}` envelope into `T`.
///
/// A non-2xx status whose body is not an envelope is reported as
/// [`ApiError::Http`]; an envelope with `success: false` always becomes
/// [`ApiError::Server`], whatever the status.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let ok_status = (200..300).contains(&status);
    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) if !ok_status => return Err(ApiError::Http { status }),
        Err(e) => return Err(e.into()),
    };

    match value.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(serde_json::from_value(value)?),
        Some(false) => {
            let message = value
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string();
            Err(ApiError::Server(message))
        }
        None if !ok_status => Err(ApiError::Http { status }),
        None => Err(ApiError::Decode("response has no success flag".to_string())),
    }
}

/// Milliseconds since the epoch, used as a cache-busting query parameter
pub fn cache_buster() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Listing {
        needs: Vec<String>,
    }

    #[test]
    fn test_success_envelope() {
        let listing: Listing = decode_response(200, r#"{"success": true, "needs": ["a", "b"]}"#).unwrap();
        assert_eq!(listing.needs, vec!["a", "b"]);
    }

    #[test]
    fn test_server_error_keeps_text() {
        let err = decode_response::<Listing>(400, r#"{"success": false, "error": "Only 2 items remaining"}"#).unwrap_err();
        assert_eq!(err, ApiError::Server("Only 2 items remaining".to_string()));
    }

    #[test]
    fn test_server_error_without_text() {
        let err = decode_response::<Listing>(500, r#"{"success": false}"#).unwrap_err();
        assert_eq!(err, ApiError::Server("Unknown error".to_string()));
    }

    #[test]
    fn test_non_json_error_status() {
        let err = decode_response::<Listing>(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, ApiError::Http { status: 502 });
    }

    #[test]
    fn test_garbage_with_ok_status_is_decode_error() {
        let err = decode_response::<Listing>(200, "not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_no_cache_headers() {
        let headers = no_cache_headers();
        assert_eq!(headers[CACHE_CONTROL], "no-cache, no-store, must-revalidate");
        assert_eq!(headers[PRAGMA], "no-cache");
        assert_eq!(headers[EXPIRES], "0");
    }

    #[test]
    fn test_url_joins_base() {
        let api = ApiClient::new("http://localhost:5000/");
        assert_eq!(api.url("/api/dashboard"), "http://localhost:5000/api/dashboard");
    }
}
