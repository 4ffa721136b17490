//! Month arithmetic on `NaiveDate`.
//!
//! Only the year and month of the dates passed in here matter; the day is
//! carried along where it has to be (see [`add_months`]).

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::error::{PortalError, PortalResult};

/// First calendar day of the month containing `date`.
pub fn first_day(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Last calendar day of the month containing `date`.
pub fn last_day(date: NaiveDate) -> NaiveDate {
    first_day(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Shift `date` by `months` (negative goes backwards).
///
/// The day of month is clamped to the length of the target month, so
/// January 31st plus one month is the last day of February.
/// Returns `None` when the result would fall outside chrono's range.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

/// Parse a month argument: `YYYY-MM` (first of that month) or a full
/// `YYYY-MM-DD` date. Years outside 1..=9999 are rejected.
pub fn parse_month(s: &str) -> PortalResult<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
        .ok()
        .filter(|date| (1..=9999).contains(&date.year()))
        .ok_or_else(|| PortalError::InvalidDate(s.to_string()))
}

/// Human label for the month, e.g. "May 2025".
pub fn label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
