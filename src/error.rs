//! API Errors
//!
//! Transport failures and application (`success: false`) failures share one
//! enum so each page can decide which tier it is looking at.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, aborted)
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx status without a decodable envelope
    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("invalid response: {0}")]
    Decode(String),

    /// `success: false`, carrying the server's text verbatim
    #[error("{0}")]
    Server(String),
}

impl ApiError {
    /// Network, status and decode failures, as opposed to server-reported ones
    pub fn is_transport(&self) -> bool {
        !matches!(self, ApiError::Server(_))
    }

    /// Text for a list's error panel
    pub fn panel_message(&self) -> String {
        if self.is_transport() {
            format!("Connection error: {}", self)
        } else {
            format!("API Error: {}", self)
        }
    }

    /// Alert text after a failed submit or delete
    pub fn action_alert(&self) -> String {
        match self {
            ApiError::Server(message) => format!("❌ Error: {}", message),
            _ => "❌ Connection error. Please try again.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_verbatim() {
        let err = ApiError::Server("Only 3 items remaining".to_string());
        assert_eq!(err.to_string(), "Only 3 items remaining");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_variants() {
        assert!(ApiError::Http { status: 502 }.is_transport());
        assert_eq!(ApiError::Http { status: 502 }.to_string(), "HTTP 502");
        assert!(ApiError::Network("offline".into()).is_transport());
    }

    #[test]
    fn test_panel_message_tiers() {
        assert_eq!(ApiError::Server("db down".into()).panel_message(), "API Error: db down");
        assert_eq!(ApiError::Http { status: 500 }.panel_message(), "Connection error: HTTP 500");
    }

    #[test]
    fn test_action_alert_tiers() {
        assert_eq!(ApiError::Server("Need not found".into()).action_alert(), "❌ Error: Need not found");
        assert_eq!(
            ApiError::Network("offline".into()).action_alert(),
            "❌ Connection error. Please try again."
        );
    }
}
