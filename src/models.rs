//! Frontend Models
//!
//! Data structures matching the relief backend's JSON. Quantities, progress
//! and status are server-computed and displayed as received.

use serde::{Deserialize, Serialize};

/// A volunteer-posted relief request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Need {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub required_quantity: i64,
    #[serde(default)]
    pub donated_quantity: i64,
    #[serde(default)]
    pub remaining_quantity: i64,
    #[serde(default)]
    pub urgency_level: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub progress_percentage: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub volunteer_name: String,
    #[serde(default)]
    pub volunteer_phone: Option<String>,
    #[serde(default)]
    pub volunteer_email: Option<String>,
    #[serde(default)]
    pub volunteer_location: Option<String>,
    #[serde(default)]
    pub donations: Vec<PledgeEntry>,
}

impl Need {
    pub fn urgency(&self) -> Urgency {
        Urgency::from_level(&self.urgency_level)
    }

    pub fn status(&self) -> NeedStatus {
        NeedStatus::from_value(&self.status)
    }

    /// Progress as sent by the server, 0 when absent
    pub fn progress(&self) -> f64 {
        self.progress_percentage.unwrap_or(0.0)
    }

    pub fn pledges(&self) -> impl Iterator<Item = &DonationPledge> {
        self.donations.iter().filter_map(|entry| match entry {
            PledgeEntry::Pledge(pledge) => Some(pledge),
            PledgeEntry::Reference(_) => None,
        })
    }
}

/// Entry of a need's `donations` array.
///
/// The backend stores bare donation ids there; richer deployments embed the
/// pledge itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PledgeEntry {
    Pledge(DonationPledge),
    Reference(String),
}

/// A donor's committed quantity against a need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationPledge {
    #[serde(default, alias = "_id")]
    pub donation_id: Option<String>,
    pub donor_name: String,
    #[serde(default)]
    pub donor_phone: String,
    #[serde(default)]
    pub donor_email: Option<String>,
    #[serde(default)]
    pub pledged_quantity: i64,
    #[serde(default)]
    pub donation_method: String,
    #[serde(default)]
    pub delivery_notes: Option<String>,
    #[serde(default, alias = "created_at")]
    pub pledge_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Unknown,
}

impl Urgency {
    pub fn from_level(level: &str) -> Self {
        match level {
            "critical" => Urgency::Critical,
            "high" => Urgency::High,
            "medium" => Urgency::Medium,
            _ => Urgency::Unknown,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Urgency::Critical => "🔴",
            Urgency::High => "🟡",
            Urgency::Medium => "🟢",
            Urgency::Unknown => "⚪",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedStatus {
    Active,
    Fulfilled,
    Unknown,
}

impl NeedStatus {
    pub fn from_value(value: &str) -> Self {
        match value {
            "active" => NeedStatus::Active,
            "fulfilled" => NeedStatus::Fulfilled,
            _ => NeedStatus::Unknown,
        }
    }
}

/// How a donor intends to hand over a pledge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationMethod {
    Direct,
    Pickup,
    DropOff,
    Online,
}

impl DonationMethod {
    pub const ALL: [DonationMethod; 4] = [
        DonationMethod::Direct,
        DonationMethod::Pickup,
        DonationMethod::DropOff,
        DonationMethod::Online,
    ];

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.value() == value)
    }

    /// Wire value
    pub fn value(self) -> &'static str {
        match self {
            DonationMethod::Direct => "direct",
            DonationMethod::Pickup => "pickup",
            DonationMethod::DropOff => "drop_off",
            DonationMethod::Online => "online",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DonationMethod::Direct => "Direct Delivery",
            DonationMethod::Pickup => "Volunteer Pickup",
            DonationMethod::DropOff => "Drop-off at Location",
            DonationMethod::Online => "Online Transfer",
        }
    }
}

/// Aggregate counters shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub active_needs_count: u64,
    pub fulfilled_needs_count: u64,
    pub total_donations: u64,
    pub critical_needs_count: u64,
}

/// Volunteer details returned after a pledge is accepted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolunteerContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_need_from_backend_json() {
        let need: Need = serde_json::from_value(json!({
            "_id": "66f0c0ffee",
            "item_name": "Blankets",
            "required_quantity": 50,
            "donated_quantity": 20,
            "remaining_quantity": 30,
            "urgency_level": "critical",
            "status": "active",
            "progress_percentage": 40.0,
            "created_at": "2024-06-01T08:30:00.123456",
            "volunteer_name": "Asha",
            "volunteer_phone": "+91 98765 43210",
            "volunteer_email": "",
            "donations": ["66f0d0"]
        }))
        .unwrap();

        assert_eq!(need.id, "66f0c0ffee");
        assert_eq!(need.urgency(), Urgency::Critical);
        assert_eq!(need.status(), NeedStatus::Active);
        assert_eq!(need.progress(), 40.0);
        assert_eq!(need.donations, vec![PledgeEntry::Reference("66f0d0".to_string())]);
        assert_eq!(need.pledges().count(), 0);
    }

    #[test]
    fn test_embedded_pledges() {
        let need: Need = serde_json::from_value(json!({
            "_id": "n1",
            "item_name": "Rice",
            "donations": [{
                "donation_id": "d1",
                "donor_name": "Ravi",
                "donor_phone": "9876543210",
                "pledged_quantity": 5,
                "donation_method": "drop_off",
                "created_at": "2024-06-02T10:00:00"
            }]
        }))
        .unwrap();

        let pledges: Vec<_> = need.pledges().collect();
        assert_eq!(pledges.len(), 1);
        assert_eq!(pledges[0].pledged_quantity, 5);
        assert_eq!(pledges[0].pledge_date.as_deref(), Some("2024-06-02T10:00:00"));
        assert_eq!(DonationMethod::from_value(&pledges[0].donation_method), Some(DonationMethod::DropOff));
    }

    #[test]
    fn test_missing_progress_is_zero() {
        let need: Need = serde_json::from_value(json!({"_id": "n2", "progress_percentage": null})).unwrap();
        assert_eq!(need.progress(), 0.0);
        assert_eq!(need.urgency(), Urgency::Unknown);
        assert_eq!(need.status(), NeedStatus::Unknown);
    }

    #[test]
    fn test_urgency_icons() {
        assert_eq!(Urgency::from_level("high").icon(), "🟡");
        assert_eq!(Urgency::from_level("medium").icon(), "🟢");
        assert_eq!(Urgency::from_level("CRITICAL").icon(), "⚪");
    }
}
