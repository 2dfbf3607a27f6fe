//! CSV Export
//!
//! Serializes the volunteer's cached needs list. Every cell is quoted and
//! embedded quotes are doubled.

use std::fmt::Display;

use chrono::{NaiveDate, TimeZone};

use crate::format::{number, raw_date_in};
use crate::models::Need;

pub const CSV_MIME: &str = "text/csv;charset=utf-8;";

pub const CSV_HEADERS: [&str; 13] = [
    "Item Name",
    "Required Quantity",
    "Donated Quantity",
    "Remaining Quantity",
    "Urgency Level",
    "Status",
    "Volunteer Name",
    "Phone",
    "Email",
    "Location",
    "Description",
    "Created Date",
    "Progress %",
];

pub fn csv_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|cell| csv_cell(cell.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

fn need_row<Tz: TimeZone>(need: &Need, tz: &Tz) -> [String; 13]
where
    Tz::Offset: Display,
{
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        need.item_name.clone(),
        need.required_quantity.to_string(),
        need.donated_quantity.to_string(),
        need.remaining_quantity.to_string(),
        need.urgency_level.clone(),
        need.status.clone(),
        need.volunteer_name.clone(),
        text(&need.volunteer_phone),
        text(&need.volunteer_email),
        text(&need.volunteer_location),
        text(&need.description),
        raw_date_in(need.created_at.as_deref(), tz),
        number(need.progress()),
    ]
}

/// Header row plus one row per need, joined with `\n`
pub fn needs_to_csv<Tz: TimeZone>(needs: &[Need], tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    std::iter::once(csv_row(CSV_HEADERS))
        .chain(needs.iter().map(|need| csv_row(need_row(need, tz))))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("aidconnect-needs-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn need() -> Need {
        serde_json::from_value(json!({
            "_id": "n1",
            "item_name": "Blankets",
            "required_quantity": 50,
            "donated_quantity": 20,
            "remaining_quantity": 30,
            "urgency_level": "critical",
            "status": "active",
            "progress_percentage": 40.0,
            "created_at": "2024-06-01T08:30:00",
            "volunteer_name": "Bob \"Relief\" Smith",
            "volunteer_phone": "9876543210",
            "description": "wool, not synthetic"
        }))
        .unwrap()
    }

    #[test]
    fn test_quotes_are_doubled() {
        assert_eq!(csv_cell("Bob \"Relief\" Smith"), "\"Bob \"\"Relief\"\" Smith\"");
    }

    #[test]
    fn test_header_row() {
        let csv = needs_to_csv(&[], &Utc);
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("\"Item Name\",\"Required Quantity\","));
        assert!(csv.ends_with("\"Created Date\",\"Progress %\""));
    }

    #[test]
    fn test_need_row() {
        let csv = needs_to_csv(&[need()], &Utc);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"Blankets\",\"50\",\"20\",\"30\",\"critical\",\"active\",\"Bob \"\"Relief\"\" Smith\",\
             \"9876543210\",\"\",\"\",\"wool, not synthetic\",\"6/1/2024\",\"40\""
        );
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        assert_eq!(export_file_name(date), "aidconnect-needs-2024-06-09.csv");
    }
}
