//! Calendar-day matching.
//!
//! Dates are compared at day granularity: time of day and timezone offsets
//! are dropped on both sides before comparing. Only ISO-like forms are
//! understood (`2021`, `2021-01`, `2021-01-01`, `2021-01-01T12:00:00Z`, ...).

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::relational::{has_operator, split_operator};

const DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-like date or date-time into its calendar day.
///
/// Partial dates resolve to their first day: `2021` is 2021-01-01 and
/// `2021-06` is 2021-06-01. Offsets are discarded, keeping the day as
/// written.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let text = text.to_ascii_uppercase();

    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Some(dt.naive_local().date());
    }
    if let Some(dt) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
    {
        return Some(dt.date());
    }
    if let Ok(day) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        return Some(day);
    }
    parse_partial(&text)
}

fn parse_partial(text: &str) -> Option<NaiveDate> {
    let (year, month) = match text.split_once('-') {
        Some((year, month)) => (year, Some(month)),
        None => (text, None),
    };
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = match month {
        None => 1,
        Some(m) if m.len() == 2 && m.bytes().all(|b| b.is_ascii_digit()) => m.parse().ok()?,
        Some(_) => return None,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

/// Checks a calendar day against a query.
///
/// Without an operator, a parseable query matches the same day, or any day
/// whose `YYYY-MM-DD` text contains the query (so `2021` and `2021-01` act as
/// partial matches). With an operator, the operand must parse as a date and
/// is compared by day.
pub fn matches(value: NaiveDate, query: &str) -> bool {
    if !has_operator(query) {
        if let Some(day) = parse_date(query) {
            return day == value || value.format("%Y-%m-%d").to_string().contains(query.trim());
        }
    }

    let Some((op, operand)) = split_operator(query) else {
        return false;
    };
    let Some(day) = parse_date(operand) else {
        return false;
    };
    op.eval(value.cmp(&day))
}

/// Checks an ISO date string against a query. Unparseable values never match.
pub fn matches_str(value: &str, query: &str) -> bool {
    parse_date(value).is_some_and(|day| matches(day, query))
}
