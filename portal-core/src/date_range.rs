//! Date ranges for the `startDate`/`endDate` query of `GET /events`.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

use crate::month;

/// Inclusive range of instants sent to the events endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// The whole month containing `date`: first day at midnight through the
    /// last millisecond of the last day.
    pub fn for_month(date: NaiveDate) -> Self {
        let from = month::first_day(date).and_time(NaiveTime::MIN).and_utc();
        let last = month::last_day(date);
        let to = last
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap_or_else(|| last.and_time(NaiveTime::MIN))
            .and_utc();
        DateRange { from, to }
    }

    /// From `now` until midnight (UTC) opening the `horizon` day. A horizon
    /// that has already passed yields an empty range at `now`, never one that
    /// ends before it starts.
    pub fn upcoming(now: DateTime<Utc>, horizon: NaiveDate) -> Self {
        let to = horizon.and_time(NaiveTime::MIN).and_utc();
        DateRange {
            from: now,
            to: to.max(now),
        }
    }

    /// `startDate` as the API expects it, e.g. `2025-05-01T00:00:00.000Z`.
    pub fn start_param(&self) -> String {
        self.from.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn end_param(&self) -> String {
        self.to.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Query pairs for the events endpoint.
    pub fn query(&self) -> [(&'static str, String); 2] {
        [("startDate", self.start_param()), ("endDate", self.end_param())]
    }
}
