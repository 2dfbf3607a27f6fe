//! Donor Endpoints
//!
//! Filtered needs listing and pledge submission.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use super::{cache_buster, no_cache_headers, ApiClient};
use crate::error::ApiError;
use crate::models::{Need, VolunteerContact};

/// Characters left alone by JavaScript's `encodeURIComponent`
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Urgency filter tags on the donor page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrgencyFilter {
    #[default]
    All,
    Critical,
    High,
    Medium,
}

impl UrgencyFilter {
    pub const ALL: [UrgencyFilter; 4] = [
        UrgencyFilter::All,
        UrgencyFilter::Critical,
        UrgencyFilter::High,
        UrgencyFilter::Medium,
    ];

    pub fn value(self) -> &'static str {
        match self {
            UrgencyFilter::All => "all",
            UrgencyFilter::Critical => "critical",
            UrgencyFilter::High => "high",
            UrgencyFilter::Medium => "medium",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UrgencyFilter::All => "All Needs",
            UrgencyFilter::Critical => "🔴 Critical",
            UrgencyFilter::High => "🟡 High",
            UrgencyFilter::Medium => "🟢 Medium",
        }
    }
}

/// Query string for the needs listing: optional urgency and search, then the
/// two cache-busting parameters
pub fn needs_query(filter: UrgencyFilter, search: &str, t: u64, r: f64) -> String {
    let mut query = String::from("?");
    if filter != UrgencyFilter::All {
        query.push_str(&format!("urgency={}&", filter.value()));
    }
    if !search.is_empty() {
        query.push_str(&format!("search={}&", utf8_percent_encode(search, URI_COMPONENT)));
    }
    query.push_str(&format!("t={}&r={}", t, r));
    query
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NeedsListing {
    #[serde(default)]
    pub needs: Vec<Need>,
}

/// Body of `POST /api/donor/donate`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PledgeRequest {
    pub need_id: String,
    pub donor_name: String,
    pub donor_phone: String,
    pub donor_email: String,
    pub pledged_quantity: i64,
    pub donation_method: String,
    pub delivery_notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PledgeReceipt {
    #[serde(default)]
    pub donation_id: Option<String>,
    #[serde(default)]
    pub remaining_quantity: Option<i64>,
    #[serde(default)]
    pub volunteer_contact: Option<VolunteerContact>,
}

impl ApiClient {
    pub async fn list_available_needs(&self, filter: UrgencyFilter, search: &str) -> Result<Vec<Need>, ApiError> {
        let query = needs_query(filter, search, cache_buster(), js_sys::Math::random());
        log::debug!("[API] GET /api/donor/needs{}", query);
        let request = self
            .http
            .get(self.url(&format!("/api/donor/needs{}", query)))
            .headers(no_cache_headers());
        let listing: NeedsListing = self.send(request).await?;
        Ok(listing.needs)
    }

    pub async fn pledge_donation(&self, pledge: &PledgeRequest) -> Result<PledgeReceipt, ApiError> {
        let request = self.http.post(self.url("/api/donor/donate")).json(pledge);
        self.send(request).await
    }
}
