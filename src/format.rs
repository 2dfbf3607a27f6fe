//! Display Formatting
//!
//! Timestamp parsing, relative times and number rendering shared by the
//! view models and the CSV export.

use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Parse a backend timestamp. Naive ISO timestamps are treated as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Short date in `tz`, e.g. `6/1/2024`
pub fn date_in<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%-m/%-d/%Y").to_string()
}

/// Date and time in `tz`, e.g. `6/1/2024 2:05:09 PM`
pub fn date_time_in<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%-m/%-d/%Y %-I:%M:%S %p").to_string()
}

/// Wall-clock time in `tz`, e.g. `2:05:09 PM`
pub fn time_in<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%-I:%M:%S %p").to_string()
}

/// Optional raw timestamp as a short date; empty when absent or unparsable
pub fn raw_date_in<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    raw.and_then(parse_timestamp)
        .map(|ts| date_in(&ts, tz))
        .unwrap_or_default()
}

/// "3 days ago", "1 hour ago", "just now"; "recently" without a usable timestamp
pub fn time_ago(raw: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(then) = raw.and_then(parse_timestamp) else {
        return "recently".to_string();
    };
    let elapsed = now.signed_duration_since(then);
    let plural = |n: i64, unit: &str| format!("{} {}{} ago", n, unit, if n > 1 { "s" } else { "" });

    if elapsed.num_days() > 0 {
        plural(elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        plural(elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        plural(elapsed.num_minutes(), "minute")
    } else {
        "just now".to_string()
    }
}

/// Render a number the way the backend's JSON reads: `40`, `33.3`
pub fn number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Empty or whitespace-only strings count as absent
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(raw: &str) -> DateTime<Utc> {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn test_parse_naive_and_offset_timestamps() {
        assert_eq!(at("2024-06-01T08:30:00.123456"), at("2024-06-01T08:30:00.123456Z"));
        assert_eq!(at("2024-06-01T10:30:00+02:00"), at("2024-06-01T08:30:00Z"));
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_time_ago_units() {
        let now = at("2024-06-10T12:00:00");
        let ago = |d: Duration| {
            let then = (now - d).format("%Y-%m-%dT%H:%M:%S").to_string();
            time_ago(Some(&then), now)
        };
        assert_eq!(ago(Duration::days(3)), "3 days ago");
        assert_eq!(ago(Duration::days(1)), "1 day ago");
        assert_eq!(ago(Duration::hours(5)), "5 hours ago");
        assert_eq!(ago(Duration::minutes(1)), "1 minute ago");
        assert_eq!(ago(Duration::seconds(20)), "just now");
        assert_eq!(time_ago(None, now), "recently");
    }

    #[test]
    fn test_dates() {
        let ts = at("2024-06-01T14:05:09");
        assert_eq!(date_in(&ts, &Utc), "6/1/2024");
        assert_eq!(date_time_in(&ts, &Utc), "6/1/2024 2:05:09 PM");
        assert_eq!(time_in(&ts, &Utc), "2:05:09 PM");
        assert_eq!(raw_date_in(None, &Utc), "");
        assert_eq!(raw_date_in(Some("bad"), &Utc), "");
    }

    #[test]
    fn test_number() {
        assert_eq!(number(40.0), "40");
        assert_eq!(number(33.3), "33.3");
        assert_eq!(number(0.0), "0");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(Some(" a@b.org ")), Some("a@b.org"));
        assert_eq!(non_empty(None), None);
    }
}
