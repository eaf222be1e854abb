//! Shared date parsing for plan lines.
//!
//! Accepted shapes, tried in order:
//! - `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY.MM.DD`, `YYYYMMDD`
//! - day-first `DD/MM/YYYY`, `DD.MM.YYYY`, `DD-MM-YYYY`
//! - `5 Mar 2025`, `5 March 2025`, `Mar 5, 2025`, `March 5, 2025`
//! - RFC 3339 and ISO 8601 date-times (the time part is dropped)

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid digit-run regex"));

/// Years outside this window are parse accidents (`01-03-25` read as year 1).
const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 1900..=2200;

fn plausible(date: NaiveDate) -> Option<NaiveDate> {
    PLAUSIBLE_YEARS.contains(&date.year()).then_some(date)
}

fn parse_compact(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let year = text[0..4].parse().ok()?;
    let month = text[4..6].parse().ok()?;
    let day = text[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a date in any of the accepted shapes.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(date) = parse_compact(text).and_then(plausible) {
        return Some(date);
    }
    for format in DATE_FORMATS {
        if let Some(date) = NaiveDate::parse_from_str(text, format).ok().and_then(plausible) {
            return Some(date);
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return plausible(datetime.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .and_then(|datetime| plausible(datetime.date()))
}

/// Target year of an ABP cycle identifier: its last standalone 4-digit token.
///
/// `"ABP 2025"`, `"ABP_2024_2025"` and `"FY-2025"` all target the last year named.
pub fn abp_target_year(cycle: &str) -> Option<i32> {
    DIGIT_RUN
        .find_iter(cycle)
        .filter(|token| token.len() == 4)
        .last()
        .and_then(|token| token.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_year_first_shapes() {
        assert_eq!(parse_date("2025-03-01"), Some(ymd(2025, 3, 1)));
        assert_eq!(parse_date("2025/03/01"), Some(ymd(2025, 3, 1)));
        assert_eq!(parse_date("20250301"), Some(ymd(2025, 3, 1)));
    }

    #[test]
    fn parses_day_first_shapes() {
        assert_eq!(parse_date("01/03/2025"), Some(ymd(2025, 3, 1)));
        assert_eq!(parse_date("01.03.2025"), Some(ymd(2025, 3, 1)));
        assert_eq!(parse_date("01-03-2025"), Some(ymd(2025, 3, 1)));
    }

    #[test]
    fn parses_named_months_and_datetimes() {
        assert_eq!(parse_date("5 Mar 2025"), Some(ymd(2025, 3, 5)));
        assert_eq!(parse_date("March 5, 2025"), Some(ymd(2025, 3, 5)));
        assert_eq!(parse_date("2025-03-05T10:30:00Z"), Some(ymd(2025, 3, 5)));
        assert_eq!(parse_date("2025-03-05 10:30:00"), Some(ymd(2025, 3, 5)));
    }

    #[test]
    fn rejects_garbage_and_implausible_years() {
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2025-13-01"), None);
        assert_eq!(parse_date("01-03-25"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn abp_year_takes_last_four_digit_token() {
        assert_eq!(abp_target_year("ABP 2025"), Some(2025));
        assert_eq!(abp_target_year("ABP_2024_2025"), Some(2025));
        assert_eq!(abp_target_year("Cycle 12 / 2026"), Some(2026));
        assert_eq!(abp_target_year("ABP Q1"), None);
        assert_eq!(abp_target_year("ABP 202512"), None);
    }
}
