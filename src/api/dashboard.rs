//! Dashboard Endpoints

use serde::Deserialize;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{DashboardStats, Need};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub active_needs: Vec<Need>,
    #[serde(default)]
    pub fulfilled_needs: Vec<Need>,
}

impl ApiClient {
    pub async fn load_dashboard(&self) -> Result<DashboardData, ApiError> {
        let request = self.http.get(self.url("/api/dashboard"));
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::decode_response;

    #[test]
    fn test_decode_dashboard() {
        let body = r#"{
            "success": true,
            "stats": {"active_needs_count": 2, "fulfilled_needs_count": 1, "total_donations": 7, "critical_needs_count": 1},
            "active_needs": [{"_id": "a", "item_name": "Tents", "status": "active"}],
            "fulfilled_needs": []
        }"#;
        let data: DashboardData = decode_response(200, body).unwrap();
        assert_eq!(data.stats.total_donations, 7);
        assert_eq!(data.active_needs.len(), 1);
        assert!(data.fulfilled_needs.is_empty());
    }
}
