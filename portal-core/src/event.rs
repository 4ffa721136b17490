//! Event types.
//!
//! `EventRecord` is the JSON shape the portal API returns. Callers convert
//! records into `Event` once, right after fetching, so that the rest of the
//! client works with a real calendar date instead of a timestamp string.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{PortalError, PortalResult};

/// A class or guide attached to an event (populated as `{ _id, name }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// An event as returned by `GET /events` and `POST /events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
    pub title: String,
    /// ISO-8601 timestamp or date
    pub date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub classes: Vec<EntityRef>,
    #[serde(default)]
    pub guides: Vec<EntityRef>,
}

/// An event with its date resolved to a calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Option<String>,
    pub event_id: Option<String>,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub classes: Vec<EntityRef>,
    pub guides: Vec<EntityRef>,
}

impl Event {
    /// "09:00-10:30", "09:00", or `None` when no times are set.
    pub fn time_span(&self) -> Option<String> {
        let start = self.start_time.as_deref().filter(|s| !s.is_empty());
        let end = self.end_time.as_deref().filter(|s| !s.is_empty());
        match (start, end) {
            (Some(s), Some(e)) => Some(format!("{s}-{e}")),
            (Some(s), None) => Some(s.to_string()),
            (None, Some(e)) => Some(format!("until {e}")),
            (None, None) => None,
        }
    }

    pub fn class_names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn guide_names(&self) -> Vec<&str> {
        self.guides.iter().map(|g| g.name.as_str()).collect()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = PortalError;

    fn try_from(record: EventRecord) -> PortalResult<Self> {
        let date = parse_event_date(&record.date)?;
        Ok(Event {
            id: record.id,
            event_id: record.event_id,
            title: record.title,
            date,
            start_time: record.start_time,
            end_time: record.end_time,
            location: record.location,
            description: record.description,
            classes: record.classes,
            guides: record.guides,
        })
    }
}

/// Extract the calendar date from an event's `date` field.
///
/// Timestamps keep the date as written, so `2025-05-01T00:00:00Z` is May 1st
/// no matter which timezone the client runs in. Timestamps without an offset
/// (`2025-05-01T10:00:00`, `2025-05-01T10:00`) are read the same way.
pub fn parse_event_date(s: &str) -> PortalResult<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| PortalError::InvalidDate(s.to_string()))
}

/// Convert a fetched batch, dropping records whose date does not parse.
pub fn parse_events(records: Vec<EventRecord>) -> Vec<Event> {
    records
        .into_iter()
        .filter_map(|record| {
            let title = record.title.clone();
            match Event::try_from(record) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(title = %title, error = %e, "skipping event with unusable date");
                    None
                }
            }
        })
        .collect()
}

/// Body of `POST /events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Class ids
    pub classes: Vec<String>,
    /// Guide (user) ids
    pub guides: Vec<String>,
}

impl NewEvent {
    /// The backend rejects events without a title; check before sending.
    pub fn validate(&self) -> PortalResult<()> {
        if self.title.trim().is_empty() {
            return Err(PortalError::Validation("event title is required".into()));
        }
        for (field, value) in [("start time", &self.start_time), ("end time", &self.end_time)] {
            if let Some(value) = value {
                if chrono::NaiveTime::parse_from_str(value, "%H:%M").is_err() {
                    return Err(PortalError::Validation(format!(
                        "{field} '{value}' is not in HH:MM form"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn deserialize_populated_record() {
        let json = r#"{
            "_id": "663a1f",
            "eventId": "7",
            "title": "Math Workshop",
            "date": "2025-05-01T00:00:00.000Z",
            "startTime": "09:00",
            "endTime": "10:30",
            "location": "Room 4",
            "classes": [{"_id": "c1", "name": "Grade 5"}],
            "guides": [{"_id": "g1", "name": "Ana"}],
            "__v": 0
        }"#;
        let record: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.event_id.as_deref(), Some("7"));
        assert_eq!(record.classes[0].name, "Grade 5");

        let event = Event::try_from(record).unwrap();
        assert_eq!(event.date, ymd(2025, 5, 1));
        assert_eq!(event.time_span().as_deref(), Some("09:00-10:30"));
        assert_eq!(event.guide_names(), vec!["Ana"]);
        assert!(event.description.is_none());
    }

    #[test]
    fn deserialize_minimal_record() {
        let record: EventRecord =
            serde_json::from_str(r#"{"title": "Trip", "date": "2025-06-02"}"#).unwrap();
        let event = Event::try_from(record).unwrap();
        assert_eq!(event.date, ymd(2025, 6, 2));
        assert!(event.classes.is_empty());
        assert_eq!(event.time_span(), None);
    }

    #[test]
    fn event_date_ignores_time_of_day() {
        assert_eq!(parse_event_date("2025-05-01T00:00:00Z").unwrap(), ymd(2025, 5, 1));
        assert_eq!(parse_event_date("2025-05-01T23:59:59.999Z").unwrap(), ymd(2025, 5, 1));
        // the date as written, not shifted to UTC
        assert_eq!(parse_event_date("2025-05-01T22:00:00-05:00").unwrap(), ymd(2025, 5, 1));
        assert_eq!(parse_event_date("2025-05-01").unwrap(), ymd(2025, 5, 1));
    }

    #[test]
    fn event_date_accepts_timestamps_without_offset() {
        assert_eq!(parse_event_date("2025-05-01T10:00:00").unwrap(), ymd(2025, 5, 1));
        assert_eq!(parse_event_date("2025-05-01T10:00:00.000").unwrap(), ymd(2025, 5, 1));
        assert_eq!(parse_event_date("2025-05-01T23:30").unwrap(), ymd(2025, 5, 1));

        let record: EventRecord =
            serde_json::from_str(r#"{"title":"Open day","date":"2025-05-01T10:00:00"}"#).unwrap();
        assert_eq!(parse_events(vec![record]).len(), 1);
    }

    #[test]
    fn event_date_rejects_garbage() {
        assert!(matches!(parse_event_date("next tuesday"), Err(PortalError::InvalidDate(_))));
        assert!(parse_event_date("").is_err());
    }

    #[test]
    fn parse_events_skips_bad_dates() {
        let records = vec![
            serde_json::from_str(r#"{"title":"A","date":"2025-05-01T00:00:00Z"}"#).unwrap(),
            serde_json::from_str(r#"{"title":"B","date":"not a date"}"#).unwrap(),
            serde_json::from_str(r#"{"title":"C","date":"2025-05-03"}"#).unwrap(),
        ];
        let events = parse_events(records);
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn new_event_serializes_camel_case() {
        let new = NewEvent {
            title: "Science Fair".into(),
            date: ymd(2025, 5, 20),
            start_time: Some("13:00".into()),
            end_time: None,
            location: None,
            description: None,
            classes: vec!["c1".into()],
            guides: vec![],
        };
        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["date"], "2025-05-20");
        assert_eq!(value["startTime"], "13:00");
        assert!(value.get("endTime").is_none());
        assert_eq!(value["classes"][0], "c1");
        assert!(new.validate().is_ok());
    }

    #[test]
    fn new_event_validation() {
        let mut new = NewEvent {
            title: "  ".into(),
            date: ymd(2025, 5, 20),
            start_time: None,
            end_time: None,
            location: None,
            description: None,
            classes: vec![],
            guides: vec![],
        };
        assert!(matches!(new.validate(), Err(PortalError::Validation(_))));

        new.title = "Assembly".into();
        new.end_time = Some("3pm".into());
        assert!(matches!(new.validate(), Err(PortalError::Validation(_))));
    }
}
