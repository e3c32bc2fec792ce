//! Display-date helpers and inclusive calendar date ranges.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder rendered when a record carries no usable timestamp.
pub const MISSING_DATE_LABEL: &str = "N/A";

/// Layouts accepted for server timestamps, tried in order after RFC 3339.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Error type for date range construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}

/// Parses a server timestamp into its calendar date.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and
/// bare `YYYY-MM-DD`. Returns `None` for empty or unrecognized input.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Formats a date as `Mon D, YYYY`, e.g. `Jan 5, 2024`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Renders an optional date, falling back to [`MISSING_DATE_LABEL`].
pub fn display_or_missing(date: Option<NaiveDate>) -> String {
    date.map(format_display_date)
        .unwrap_or_else(|| MISSING_DATE_LABEL.to_string())
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DateRangeBounds")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct DateRangeBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<DateRangeBounds> for DateRange {
    type Error = DateRangeError;

    fn try_from(bounds: DateRangeBounds) -> Result<Self, Self::Error> {
        DateRange::new(bounds.start, bounds.end)
    }
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Single-day range covering `today`.
    pub fn today(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today,
        }
    }

    /// First through last day of the calendar month before `today`.
    pub fn last_month(today: NaiveDate) -> Self {
        let first_of_this_month = today.with_day(1).unwrap_or(today);
        let end = first_of_this_month - Duration::days(1);
        let start = end.with_day(1).unwrap_or(end);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies within the range, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_mysql_datetime() {
        assert_eq!(parse_timestamp("2024-01-15 10:30:00"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(
            parse_timestamp("2024-06-30T23:15:00+00:00"),
            Some(date(2024, 6, 30))
        );
        assert_eq!(parse_timestamp("2024-06-30T23:15:00Z"), Some(date(2024, 6, 30)));
    }

    #[test]
    fn test_parse_naive_iso_and_bare_date() {
        assert_eq!(parse_timestamp("2024-02-29T08:00:00"), Some(date(2024, 2, 29)));
        assert_eq!(parse_timestamp(" 2023-12-01 "), Some(date(2023, 12, 1)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-01"), None);
    }

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date(date(2024, 1, 5)), "Jan 5, 2024");
        assert_eq!(format_display_date(date(2023, 11, 28)), "Nov 28, 2023");
    }

    #[test]
    fn test_display_or_missing() {
        assert_eq!(display_or_missing(None), "N/A");
        assert_eq!(display_or_missing(Some(date(2024, 3, 9))), "Mar 9, 2024");
    }

    #[test]
    fn test_range_includes_both_boundaries() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(range.contains(date(2024, 1, 15)));
        assert!(!range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(DateRangeError::Inverted { .. })));
    }

    #[test]
    fn test_deserialize_checks_order() {
        let range: DateRange =
            serde_json::from_str(r#"{ "start": "2024-01-01", "end": "2024-01-31" }"#).unwrap();
        assert_eq!(range.end(), date(2024, 1, 31));

        let inverted =
            serde_json::from_str::<DateRange>(r#"{ "start": "2024-02-01", "end": "2024-01-01" }"#);
        assert!(inverted.is_err());
    }

    #[test]
    fn test_today_preset() {
        let range = DateRange::today(date(2024, 5, 20));
        assert_eq!(range.start(), range.end());
        assert!(range.contains(date(2024, 5, 20)));
    }

    #[test]
    fn test_last_month_preset() {
        let range = DateRange::last_month(date(2024, 3, 15));
        assert_eq!(range.start(), date(2024, 2, 1));
        assert_eq!(range.end(), date(2024, 2, 29));
    }

    #[test]
    fn test_last_month_crosses_year() {
        let range = DateRange::last_month(date(2024, 1, 10));
        assert_eq!(range.start(), date(2023, 12, 1));
        assert_eq!(range.end(), date(2023, 12, 31));
    }
}
