//! View Models
//!
//! Plain display values derived from server data. Components render these
//! through `view!`, which escapes every text node and attribute, so nothing
//! here produces HTML.
//!
//! Quantities, progress and status are copied from the server as-is; no
//! arithmetic correction happens on the client.

use std::fmt::Display;

use chrono::{DateTime, TimeZone, Utc};
use percent_encoding::utf8_percent_encode;

use crate::api::URI_COMPONENT;
use crate::format::{date_in, date_time_in, non_empty, number, parse_timestamp, time_ago};
use crate::models::{DonationMethod, DonationPledge, Need, NeedStatus, PledgeEntry, VolunteerContact};

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub class: String,
    pub icon: &'static str,
    pub label: String,
}

impl Badge {
    pub fn urgency(need: &Need) -> Self {
        Self {
            class: format!("urgency-badge {}", need.urgency_level),
            icon: need.urgency().icon(),
            label: need.urgency_level.to_uppercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressView {
    pub percent: f64,
}

impl ProgressView {
    pub fn of(need: &Need) -> Self {
        Self { percent: need.progress() }
    }

    pub fn label(&self) -> String {
        format!("{}%", number(self.percent))
    }

    /// Bar width; clamped so a bad server value cannot overflow the track
    pub fn width_style(&self) -> String {
        format!("width: {}%", number(self.percent.clamp(0.0, 100.0)))
    }
}

// ========================
// Dashboard
// ========================

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRowView {
    pub key: String,
    pub row_class: &'static str,
    pub item_name: String,
    pub required: i64,
    pub donated: i64,
    pub remaining: i64,
    pub progress: ProgressView,
    pub status_class: String,
    pub status_label: &'static str,
    pub volunteer_name: String,
    pub updated: String,
}

impl DashboardRowView {
    pub fn from_need<Tz: TimeZone>(need: &Need, tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        let fulfilled = need.status() == NeedStatus::Fulfilled;
        Self {
            key: need.id.clone(),
            row_class: if fulfilled { "fulfilled-row" } else { "active-row" },
            item_name: need.item_name.clone(),
            required: need.required_quantity,
            donated: need.donated_quantity,
            remaining: need.remaining_quantity,
            progress: ProgressView::of(need),
            status_class: format!("status-badge {}", need.status),
            status_label: if fulfilled { "✅ Fulfilled" } else { "🔄 Active" },
            volunteer_name: need.volunteer_name.clone(),
            updated: need
                .updated_at
                .as_deref()
                .and_then(parse_timestamp)
                .map(|ts| date_time_in(&ts, tz))
                .unwrap_or_else(|| "N/A".to_string()),
        }
    }
}

/// Active needs first, then fulfilled
pub fn dashboard_rows<Tz: TimeZone>(active: &[Need], fulfilled: &[Need], tz: &Tz) -> Vec<DashboardRowView>
where
    Tz::Offset: Display,
{
    active
        .iter()
        .chain(fulfilled)
        .map(|need| DashboardRowView::from_need(need, tz))
        .collect()
}

// ========================
// Donor
// ========================

/// What the pledge modal needs to know about the need it pledges against
#[derive(Debug, Clone, PartialEq)]
pub struct PledgeTarget {
    pub need_id: String,
    pub item_name: String,
    pub max_quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactLine {
    pub icon: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonorCardView {
    pub id: String,
    pub card_class: String,
    pub item_name: String,
    pub badge: Badge,
    pub remaining: i64,
    pub required: i64,
    pub volunteer_name: String,
    pub progress: ProgressView,
    pub contacts: Vec<ContactLine>,
    /// `None` once nothing remains to pledge
    pub pledge: Option<PledgeTarget>,
}

impl DonorCardView {
    pub fn from_need(need: &Need) -> Self {
        let mut contacts: Vec<ContactLine> = [
            ("fas fa-phone", need.volunteer_phone.as_deref()),
            ("fas fa-envelope", need.volunteer_email.as_deref()),
            ("fas fa-map-marker-alt", need.volunteer_location.as_deref()),
        ]
        .into_iter()
        .filter_map(|(icon, value)| non_empty(value).map(|text| ContactLine { icon, text: text.to_string() }))
        .collect();
        if contacts.is_empty() {
            contacts.push(ContactLine {
                icon: "fas fa-info-circle",
                text: "Contact info not provided".to_string(),
            });
        }

        Self {
            id: need.id.clone(),
            card_class: format!("need-card urgency-{}", need.urgency_level),
            item_name: need.item_name.clone(),
            badge: Badge::urgency(need),
            remaining: need.remaining_quantity,
            required: need.required_quantity,
            volunteer_name: need.volunteer_name.clone(),
            progress: ProgressView::of(need),
            contacts,
            pledge: (need.remaining_quantity > 0).then(|| PledgeTarget {
                need_id: need.id.clone(),
                item_name: need.item_name.clone(),
                max_quantity: need.remaining_quantity,
            }),
        }
    }
}

pub fn needs_count_label(count: usize) -> String {
    if count == 0 {
        "No active needs at the moment".to_string()
    } else {
        format!("{} opportunities to help", count)
    }
}

/// Volunteer contact card shown after a pledge is accepted
#[derive(Debug, Clone, PartialEq)]
pub struct ContactCardView {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub location: Option<String>,
}

impl ContactCardView {
    pub fn from_contact(contact: Option<&VolunteerContact>) -> Self {
        let field = |pick: fn(&VolunteerContact) -> Option<&str>| {
            contact.and_then(|c| non_empty(pick(c))).map(str::to_string)
        };
        Self {
            name: field(|c| c.name.as_deref()).unwrap_or_else(|| "N/A".to_string()),
            phone: field(|c| c.phone.as_deref()).unwrap_or_else(|| "N/A".to_string()),
            email: field(|c| c.email.as_deref()).unwrap_or_else(|| "N/A".to_string()),
            location: field(|c| c.location.as_deref()),
        }
    }
}

// ========================
// Volunteer
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum PledgeView {
    Pledge {
        key: String,
        donor_name: String,
        quantity_label: String,
        phone: String,
        email: Option<String>,
        method_label: String,
        pledged_on: String,
        notes: Option<String>,
    },
    /// Donation known only by id
    Reference(String),
}

impl PledgeView {
    fn from_pledge<Tz: TimeZone>(index: usize, pledge: &DonationPledge, tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        PledgeView::Pledge {
            key: pledge.donation_id.clone().unwrap_or_else(|| format!("pledge-{}", index)),
            donor_name: pledge.donor_name.clone(),
            quantity_label: format!("{} items", pledge.pledged_quantity),
            phone: pledge.donor_phone.clone(),
            email: non_empty(pledge.donor_email.as_deref()).map(str::to_string),
            method_label: DonationMethod::from_value(&pledge.donation_method)
                .map(|m| m.label().to_string())
                .unwrap_or_else(|| pledge.donation_method.clone()),
            pledged_on: pledge
                .pledge_date
                .as_deref()
                .and_then(parse_timestamp)
                .map(|ts| date_in(&ts, tz))
                .unwrap_or_else(|| "Unknown date".to_string()),
            notes: non_empty(pledge.delivery_notes.as_deref()).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolunteerCardView {
    pub id: String,
    pub card_class: String,
    pub item_name: String,
    pub badge: Badge,
    pub required: i64,
    pub donated: i64,
    pub remaining: i64,
    pub status_class: String,
    pub status_label: String,
    pub progress: ProgressView,
    pub description: Option<String>,
    pub pledges: Vec<PledgeView>,
    pub posted: String,
}

impl VolunteerCardView {
    pub fn from_need<Tz: TimeZone>(need: &Need, now: DateTime<Utc>, tz: &Tz) -> Self
    where
        Tz::Offset: Display,
    {
        let pledges = need
            .donations
            .iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                PledgeEntry::Pledge(pledge) => PledgeView::from_pledge(i, pledge, tz),
                PledgeEntry::Reference(id) => PledgeView::Reference(id.clone()),
            })
            .collect();

        Self {
            id: need.id.clone(),
            card_class: format!("need-card urgency-{}", need.urgency_level),
            item_name: need.item_name.clone(),
            badge: Badge::urgency(need),
            required: need.required_quantity,
            donated: need.donated_quantity,
            remaining: need.remaining_quantity,
            status_class: format!("value status-{}", need.status),
            status_label: need.status.to_uppercase(),
            progress: ProgressView::of(need),
            description: non_empty(need.description.as_deref()).map(str::to_string),
            pledges,
            posted: time_ago(need.created_at.as_deref(), now),
        }
    }
}

/// One donor reachable over WhatsApp
#[derive(Debug, Clone, PartialEq)]
pub struct DonorContact {
    pub donor_name: String,
    pub phone: String,
    pub link: String,
}

pub fn coordination_message(need: &Need) -> String {
    format!(
        "Hello! This is {} from the relief camp. Thank you for pledging {}. When would be a good time to coordinate the donation?",
        need.volunteer_name, need.item_name
    )
}

pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{}?text={}", digits, utf8_percent_encode(message, URI_COMPONENT))
}

/// Donors with a phone number on file, each with a prefilled chat link
pub fn donor_contacts(need: &Need) -> Vec<DonorContact> {
    let message = coordination_message(need);
    need.pledges()
        .filter_map(|pledge| {
            let phone = non_empty(Some(pledge.donor_phone.as_str()))?;
            Some(DonorContact {
                donor_name: pledge.donor_name.clone(),
                phone: phone.to_string(),
                link: whatsapp_link(phone, &message),
            })
        })
        .collect()
}
