//! Which day counts as "today".
//!
//! Calendars highlight today and jump back to it, and the upcoming list
//! starts from it. Demo data is usually seeded around one date, so the anchor
//! can be pinned instead of following the clock.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodayAnchor {
    /// The local wall-clock date
    #[default]
    Live,
    Fixed(NaiveDate),
}

impl TodayAnchor {
    pub fn from_option(date: Option<NaiveDate>) -> Self {
        date.map_or(TodayAnchor::Live, TodayAnchor::Fixed)
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            TodayAnchor::Live => Local::now().date_naive(),
            TodayAnchor::Fixed(date) => *date,
        }
    }

    /// The current instant; a pinned day starts at its UTC midnight.
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            TodayAnchor::Live => Utc::now(),
            TodayAnchor::Fixed(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, TodayAnchor::Fixed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_anchor() {
        let may_first = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let anchor = TodayAnchor::from_option(Some(may_first));
        assert!(anchor.is_fixed());
        assert_eq!(anchor.date(), may_first);
        assert_eq!(anchor.now().to_rfc3339(), "2025-05-01T00:00:00+00:00");
    }

    #[test]
    fn live_is_default() {
        assert_eq!(TodayAnchor::from_option(None), TodayAnchor::Live);
        assert_eq!(TodayAnchor::default(), TodayAnchor::Live);
        assert!(!TodayAnchor::Live.is_fixed());
    }
}
