//! Form Validation
//!
//! Client-side checks for the volunteer request form and the donor pledge
//! form. Each check reports only the first failing rule.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::api::{NewNeedRequest, PledgeRequest};

pub const MAX_REQUEST_QUANTITY: i64 = 10_000;

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^[0-9+\-\s()]{10,}$").expect("phone pattern"))
}

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_re().is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email)
}

/// Leading integer of `raw`, like the browser's `parseInt`: `"12abc"` → 12,
/// `"1.9"` → 1, `"abc"` → None. Digit runs too long for `i64` saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.as_bytes().first() {
        Some(b'-') => (-1, &raw[1..]),
        Some(b'+') => (1, &raw[1..]),
        _ => (1, raw),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |n, d| n.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    Some(magnitude.saturating_mul(sign))
}

// ========================
// Volunteer Request Form
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestFormError {
    #[error("Please fill in the {0}")]
    Missing(&'static str),
    #[error("Quantity must be greater than 0")]
    QuantityTooSmall,
    #[error("Quantity cannot exceed 10,000")]
    QuantityTooLarge,
    #[error("Please enter a valid phone number (at least 10 digits)")]
    InvalidPhone,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Raw values of the volunteer's "new relief request" form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestForm {
    pub volunteer_name: String,
    pub volunteer_phone: String,
    pub volunteer_email: String,
    pub volunteer_location: String,
    pub item_name: String,
    pub quantity: String,
    pub urgency: String,
    pub description: String,
}

impl RequestForm {
    /// Trimmed request body; an unparsable quantity becomes 0
    pub fn to_request(&self) -> NewNeedRequest {
        NewNeedRequest {
            volunteer_name: self.volunteer_name.trim().to_string(),
            volunteer_phone: self.volunteer_phone.trim().to_string(),
            volunteer_email: self.volunteer_email.trim().to_string(),
            volunteer_location: self.volunteer_location.trim().to_string(),
            item_name: self.item_name.trim().to_string(),
            quantity: parse_leading_int(&self.quantity).unwrap_or(0),
            urgency: self.urgency.clone(),
            description: self.description.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<NewNeedRequest, RequestFormError> {
        let request = self.to_request();
        validate_request(&request)?;
        Ok(request)
    }
}

/// Presence, then quantity bounds, then phone, then email
pub fn validate_request(request: &NewNeedRequest) -> Result<(), RequestFormError> {
    let required = [
        (request.volunteer_name.is_empty(), "Your Name"),
        (request.volunteer_phone.is_empty(), "Phone Number"),
        (request.item_name.is_empty(), "Supply Item"),
        (request.quantity == 0, "Quantity"),
        (request.urgency.is_empty(), "Urgency Level"),
    ];
    if let Some((_, label)) = required.into_iter().find(|(missing, _)| *missing) {
        return Err(RequestFormError::Missing(label));
    }

    if request.quantity <= 0 {
        return Err(RequestFormError::QuantityTooSmall);
    }
    if request.quantity > MAX_REQUEST_QUANTITY {
        return Err(RequestFormError::QuantityTooLarge);
    }
    if !is_valid_phone(&request.volunteer_phone) {
        return Err(RequestFormError::InvalidPhone);
    }
    if !request.volunteer_email.is_empty() && !is_valid_email(&request.volunteer_email) {
        return Err(RequestFormError::InvalidEmail);
    }
    Ok(())
}

// ========================
// Donor Pledge Form
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PledgeFormError {
    #[error("Please fill in {0}")]
    Missing(&'static str),
    #[error("Please enter a valid quantity")]
    InvalidQuantity,
}

/// Raw values of the donor's pledge modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PledgeForm {
    pub donor_name: String,
    pub donor_phone: String,
    pub donor_email: String,
    pub quantity: String,
    pub donation_method: String,
    pub delivery_notes: String,
}

impl PledgeForm {
    /// Mandatory fields are name, phone, quantity and method. The quantity's
    /// upper bound lives on the input element and is not checked here.
    pub fn validate(&self, need_id: &str) -> Result<PledgeRequest, PledgeFormError> {
        let donor_name = self.donor_name.trim();
        let donor_phone = self.donor_phone.trim();
        let quantity = parse_leading_int(&self.quantity);

        let required = [
            (donor_name.is_empty(), "Your Name"),
            (donor_phone.is_empty(), "Phone Number"),
            (matches!(quantity, None | Some(0)), "Quantity"),
            (self.donation_method.is_empty(), "Donation Method"),
        ];
        if let Some((_, label)) = required.into_iter().find(|(missing, _)| *missing) {
            return Err(PledgeFormError::Missing(label));
        }

        let pledged_quantity = match quantity {
            Some(n) if n > 0 => n,
            _ => return Err(PledgeFormError::InvalidQuantity),
        };

        Ok(PledgeRequest {
            need_id: need_id.to_string(),
            donor_name: donor_name.to_string(),
            donor_phone: donor_phone.to_string(),
            donor_email: self.donor_email.trim().to_string(),
            pledged_quantity,
            donation_method: self.donation_method.clone(),
            delivery_notes: self.delivery_notes.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_form(quantity: &str) -> RequestForm {
        RequestForm {
            volunteer_name: "Asha".into(),
            volunteer_phone: "+1 (234) 567-8901".into(),
            item_name: "Blankets".into(),
            quantity: quantity.into(),
            urgency: "critical".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_quantity_bounds() {
        assert_eq!(request_form("0").validate().unwrap_err(), RequestFormError::Missing("Quantity"));
        assert_eq!(request_form("10001").validate().unwrap_err(), RequestFormError::QuantityTooLarge);
        assert_eq!(request_form("-4").validate().unwrap_err(), RequestFormError::QuantityTooSmall);
        assert_eq!(request_form("1").validate().unwrap().quantity, 1);
        assert_eq!(request_form("10000").validate().unwrap().quantity, 10_000);
    }

    #[test]
    fn test_phone_pattern() {
        let mut form = request_form("5");
        form.volunteer_phone = "12345".into();
        assert_eq!(form.validate().unwrap_err(), RequestFormError::InvalidPhone);

        form.volunteer_phone = "+1 (234) 567-8901".into();
        assert!(form.validate().is_ok());

        form.volunteer_phone = "555-CALL-NOW".into();
        assert_eq!(form.validate().unwrap_err(), RequestFormError::InvalidPhone);
    }

    #[test]
    fn test_email_only_checked_when_given() {
        let mut form = request_form("5");
        form.volunteer_email = "   ".into();
        assert!(form.validate().is_ok());

        form.volunteer_email = "asha@relief".into();
        assert_eq!(form.validate().unwrap_err(), RequestFormError::InvalidEmail);

        form.volunteer_email = "asha@relief.org".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let form = RequestForm {
            volunteer_phone: "123".into(),
            quantity: "999999".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err(), RequestFormError::Missing("Your Name"));

        let form = RequestForm { urgency: String::new(), ..request_form("20000") };
        assert_eq!(form.validate().unwrap_err(), RequestFormError::Missing("Urgency Level"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(RequestFormError::Missing("Supply Item").to_string(), "Please fill in the Supply Item");
        assert_eq!(RequestFormError::QuantityTooLarge.to_string(), "Quantity cannot exceed 10,000");
        assert_eq!(PledgeFormError::Missing("Donation Method").to_string(), "Please fill in Donation Method");
    }

    #[test]
    fn test_request_is_trimmed() {
        let form = RequestForm {
            volunteer_name: "  Asha ".into(),
            description: " tarps only ".into(),
            ..request_form(" 12abc")
        };
        let request = form.validate().unwrap();
        assert_eq!(request.volunteer_name, "Asha");
        assert_eq!(request.description, "tarps only");
        assert_eq!(request.quantity, 12);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("1.9"), Some(1));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999"), Some(-i64::MAX));
    }

    #[test]
    fn test_huge_quantity_is_too_large_not_missing() {
        assert_eq!(
            request_form("99999999999999999999").validate().unwrap_err(),
            RequestFormError::QuantityTooLarge
        );

        let form = PledgeForm { quantity: "99999999999999999999".into(), ..pledge_form() };
        assert_eq!(form.validate("n1").unwrap().pledged_quantity, i64::MAX);
    }

    fn pledge_form() -> PledgeForm {
        PledgeForm {
            donor_name: "Ravi".into(),
            donor_phone: "9876543210".into(),
            quantity: "3".into(),
            donation_method: "pickup".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_pledge_required_fields_in_order() {
        let form = PledgeForm { donor_name: " ".into(), donor_phone: String::new(), ..pledge_form() };
        assert_eq!(form.validate("n1").unwrap_err(), PledgeFormError::Missing("Your Name"));

        let form = PledgeForm { quantity: String::new(), ..pledge_form() };
        assert_eq!(form.validate("n1").unwrap_err(), PledgeFormError::Missing("Quantity"));

        let form = PledgeForm { donation_method: String::new(), ..pledge_form() };
        assert_eq!(form.validate("n1").unwrap_err(), PledgeFormError::Missing("Donation Method"));
    }

    #[test]
    fn test_pledge_quantity_must_be_positive() {
        let form = PledgeForm { quantity: "-2".into(), ..pledge_form() };
        assert_eq!(form.validate("n1").unwrap_err(), PledgeFormError::InvalidQuantity);
    }

    #[test]
    fn test_pledge_upper_bound_left_to_server() {
        let form = PledgeForm { quantity: "5000".into(), ..pledge_form() };
        let request = form.validate("n1").unwrap();
        assert_eq!(request.pledged_quantity, 5000);
        assert_eq!(request.need_id, "n1");
    }
}
