//! Volunteer Endpoints
//!
//! Listing, creating and deleting the volunteer's own relief requests.

use percent_encoding::utf8_percent_encode;
use serde::{Deserialize, Serialize};

use super::{cache_buster, no_cache_headers, ApiClient, NeedsListing, URI_COMPONENT};
use crate::error::ApiError;
use crate::models::Need;

/// Body of `POST /api/volunteer/needs`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNeedRequest {
    pub volunteer_name: String,
    pub volunteer_phone: String,
    pub volunteer_email: String,
    pub volunteer_location: String,
    pub item_name: String,
    pub quantity: i64,
    pub urgency: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Created {
    #[serde(default)]
    pub need_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Deleted {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    pub async fn list_active_needs(&self) -> Result<Vec<Need>, ApiError> {
        let url = self.url(&format!("/api/volunteer/needs?status=active&t={}", cache_buster()));
        let mut headers = no_cache_headers();
        headers.remove(reqwest::header::EXPIRES);
        let request = self.http.get(url).headers(headers);
        let listing: NeedsListing = self.send(request).await?;
        Ok(listing.needs)
    }

    pub async fn create_need(&self, need: &NewNeedRequest) -> Result<Created, ApiError> {
        let request = self.http.post(self.url("/api/volunteer/needs")).json(need);
        self.send(request).await
    }

    pub async fn delete_need(&self, id: &str) -> Result<Deleted, ApiError> {
        let path = format!("/api/volunteer/needs/{}", utf8_percent_encode(id, URI_COMPONENT));
        let request = self.http.delete(self.url(&path));
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_need_uses_camel_case_keys() {
        let body = serde_json::to_value(NewNeedRequest {
            volunteer_name: "Asha".into(),
            volunteer_phone: "+91 98765 43210".into(),
            item_name: "Water".into(),
            quantity: 40,
            urgency: "high".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({
            "volunteerName": "Asha",
            "volunteerPhone": "+91 98765 43210",
            "volunteerEmail": "",
            "volunteerLocation": "",
            "itemName": "Water",
            "quantity": 40,
            "urgency": "high",
            "description": ""
        }));
    }

    #[test]
    fn test_create_and_delete_responses() {
        let created: Created = crate::api::decode_response(
            201,
            r#"{"success": true, "need_id": "n7", "message": "Need created successfully"}"#,
        )
        .unwrap();
        assert_eq!(created.need_id.as_deref(), Some("n7"));
        assert_eq!(created.message.as_deref(), Some("Need created successfully"));

        let deleted: Deleted = crate::api::decode_response(200, r#"{"success": true}"#).unwrap();
        assert_eq!(deleted, Deleted::default());
    }
}
