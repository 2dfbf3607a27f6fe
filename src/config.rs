//! Client Configuration
//!
//! Timings and the API base, optionally overridden by a JSON blob in
//! `<meta name="relief-config" content='{...}'>`. Missing keys keep defaults.

use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;
use wasm_bindgen::JsCast;

const CONFIG_META_NAME: &str = "relief-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API origin; `None` means same origin as the page
    pub api_base: Option<String>,
    pub dashboard_refresh_ms: u32,
    pub donor_refresh_ms: u32,
    pub volunteer_refresh_ms: u32,
    pub search_debounce_ms: u32,
    pub success_modal_ms: u32,
    pub toast_ms: u32,
    pub log_level: String,
    pub log_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            dashboard_refresh_ms: 30_000,
            donor_refresh_ms: 10_000,
            volunteer_refresh_ms: 30_000,
            search_debounce_ms: 500,
            success_modal_ms: 10_000,
            toast_ms: 5_000,
            log_level: "info".to_string(),
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Read the config meta tag; invalid JSON falls back to defaults.
    ///
    /// Returns the parse failure alongside so it can be logged once the
    /// logger (whose level comes from this config) is installed.
    pub fn load() -> (Self, Option<String>) {
        let Some(raw) = meta_content(CONFIG_META_NAME) else {
            return (Self::default(), None);
        };
        match Self::from_json(&raw) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(format!("ignoring invalid {} meta: {}", CONFIG_META_NAME, e))),
        }
    }

    /// API base with any trailing slash removed, falling back to `origin`
    pub fn api_base_or(&self, origin: &str) -> String {
        let base = match self.api_base.as_deref().map(str::trim) {
            Some(base) if !base.is_empty() => base,
            _ => origin,
        };
        base.trim_end_matches('/').to_string()
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()??;
    let meta = element.dyn_into::<web_sys::HtmlMetaElement>().ok()?;
    Some(meta.content())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.dashboard_refresh_ms, 30_000);
        assert_eq!(config.donor_refresh_ms, 10_000);
        assert_eq!(config.volunteer_refresh_ms, 30_000);
        assert_eq!(config.search_debounce_ms, 500);
        assert_eq!(config.success_modal_ms, 10_000);
        assert_eq!(config.log_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ClientConfig::from_json(r#"{"donor_refresh_ms": 2000, "log_level": "debug"}"#).unwrap();
        assert_eq!(config.donor_refresh_ms, 2000);
        assert_eq!(config.volunteer_refresh_ms, 30_000);
        assert_eq!(config.log_level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(ClientConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_api_base_fallback() {
        let mut config = ClientConfig::default();
        assert_eq!(config.api_base_or("https://relief.example/"), "https://relief.example");

        config.api_base = Some("  ".to_string());
        assert_eq!(config.api_base_or("http://localhost:5000"), "http://localhost:5000");

        config.api_base = Some("https://api.relief.example/".to_string());
        assert_eq!(config.api_base_or("http://localhost:5000"), "https://api.relief.example");
    }

    #[test]
    fn test_unknown_log_level_defaults_to_info() {
        let config = ClientConfig { log_level: "loud".to_string(), ..Default::default() };
        assert_eq!(config.log_level_filter(), LevelFilter::Info);
    }
}
