//! The short "upcoming events" list shown next to calendars.

use crate::event::Event;

/// How many upcoming events a calendar page shows.
pub const UPCOMING_LIMIT: usize = 4;

/// Keep the first [`UPCOMING_LIMIT`] events in the order the API returned
/// them. No sorting happens here.
pub fn upcoming(mut events: Vec<Event>) -> Vec<Event> {
    events.truncate(UPCOMING_LIMIT);
    events
}
