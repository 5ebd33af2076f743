//! Publish-date parsing shared by the histogram and the detail table.
//!
//! All instants are interpreted in UTC. Strings with no offset are taken as UTC,
//! so a date-only value never shifts into the neighbouring month.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid date")]
pub struct InvalidDate;

// Offsets written without a colon, e.g. `+0000`, which RFC 3339 rejects.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// %m and %d accept unpadded values, so "2024-1-5" parses too.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%Y/%m/%d", "%m/%d/%Y"];

pub fn parse_published(raw: &str) -> Result<DateTime<Utc>, InvalidDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(InvalidDate);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }
    // Year-month only: first day of the month.
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    // Bare year: January 1st.
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        let date = raw
            .parse()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .ok_or(InvalidDate)?;
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(InvalidDate)
}

/// Zero-based month (0 = January) of a publish date.
pub fn published_month(raw: &str) -> Result<usize, InvalidDate> {
    parse_published(raw).map(|dt| dt.month0() as usize)
}

/// `Mar 15, 2024`, or the raw string untouched when it does not parse.
pub fn format_published(raw: &str) -> String {
    match parse_published(raw) {
        Ok(dt) => dt.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_only_is_utc_midnight() {
        let dt = parse_published("2023-01-15").unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_month_boundary_uses_utc() {
        assert_eq!(published_month("2024-01-31T23:30:00-05:00"), Ok(1));
        assert_eq!(published_month("2024-02-01T00:30:00+02:00"), Ok(0));
        assert_eq!(published_month("2024-03-01"), Ok(2));
    }

    #[test]
    fn test_accepted_shapes() {
        assert_eq!(published_month("2024-06-15T10:30:00Z"), Ok(5));
        assert_eq!(published_month("2024-06-15T10:30:00.123"), Ok(5));
        assert_eq!(published_month("2024-06-15T10:30"), Ok(5));
        assert_eq!(published_month("2024-1-5"), Ok(0));
        assert_eq!(published_month("2024-09"), Ok(8));
        assert_eq!(published_month("March 3, 2024"), Ok(2));
        assert_eq!(published_month("Dec 1, 2023"), Ok(11));
        assert_eq!(published_month("Tue, 1 Jul 2003 10:52:37 +0200"), Ok(6));
        assert_eq!(published_month("2024/04/02"), Ok(3));
        assert_eq!(published_month("01/15/2024"), Ok(0));
        assert_eq!(published_month("2024-01-15 10:30"), Ok(0));
        assert_eq!(published_month("2024-01-15T10:30:00.000+0000"), Ok(0));
        assert_eq!(published_month("2024-01-15T10:30:00+0000"), Ok(0));
        assert_eq!(published_month("2024"), Ok(0));
    }

    #[test]
    fn test_compact_offset_converts_to_utc() {
        assert_eq!(published_month("2024-01-31T23:30:00.000-0500"), Ok(1));
        assert_eq!(published_month("2024-02-01 00:30:00+0200"), Ok(0));
    }

    #[test]
    fn test_bare_year_is_january_first() {
        let dt = parse_published("2024").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(format_published("2024"), "Jan 1, 2024");
    }

    #[test]
    fn test_rejected_shapes() {
        for raw in ["", "   ", "invalid-date", "not-a-date", "2023-13-45", "2023-02-30", "13/01/2024", "20245", "24"] {
            assert_eq!(parse_published(raw), Err(InvalidDate), "{raw:?} should not parse");
        }
    }

    #[test]
    fn test_format_published() {
        assert_eq!(format_published("2024-03-15"), "Mar 15, 2024");
        assert_eq!(format_published("2024-01-05"), "Jan 5, 2024");
        assert_eq!(format_published("invalid-date"), "invalid-date");
        assert_eq!(format_published(""), "");
    }

    #[test]
    fn test_invalid_date_message() {
        assert_eq!(InvalidDate.to_string(), "Invalid date");
    }
}
