//! Selected-month state for interactive calendars.
//!
//! Navigating issues a fetch for the new month while older fetches may still
//! be in flight. Each fetch carries a [`FetchTicket`]; a response is only
//! applied if its ticket is from the latest navigation, so a slow answer for
//! a month the user already left cannot overwrite the current one.

use chrono::NaiveDate;

use crate::date_range::DateRange;
use crate::event::Event;
use crate::grid::{CalendarGrid, build_grid};
use crate::month;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    month: NaiveDate,
}

impl FetchTicket {
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn range(&self) -> DateRange {
        DateRange::for_month(self.month)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    /// First day of the selected month
    month: NaiveDate,
    generation: u64,
    events: Vec<Event>,
    /// Month the held events were fetched for
    events_month: Option<NaiveDate>,
}

impl MonthView {
    pub fn new(date: NaiveDate) -> Self {
        MonthView {
            month: month::first_day(date),
            generation: 0,
            events: Vec::new(),
            events_month: None,
        }
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Whether the held events belong to the selected month. Until the fetch
    /// for a new month lands, the previous month's events stay in place.
    pub fn is_fresh(&self) -> bool {
        self.events_month == Some(self.month)
    }

    pub fn navigate(&mut self, date: NaiveDate) {
        self.month = month::first_day(date);
        self.generation += 1;
    }

    /// Select the month containing `today`.
    pub fn jump_today(&mut self, today: NaiveDate) {
        self.navigate(today);
    }

    /// Returns `false` at the edge of representable dates.
    pub fn next(&mut self) -> bool {
        self.shift(1)
    }

    pub fn prev(&mut self) -> bool {
        self.shift(-1)
    }

    fn shift(&mut self, months: i32) -> bool {
        match month::add_months(self.month, months) {
            Some(date) => {
                self.navigate(date);
                true
            }
            None => false,
        }
    }

    /// Ticket for fetching the currently selected month.
    pub fn request(&self) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
            month: self.month,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Store `events` if `ticket` is still current. Returns whether they were
    /// applied.
    pub fn apply(&mut self, ticket: &FetchTicket, events: Vec<Event>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                month = %ticket.month,
                "discarding events fetched for a month that is no longer selected"
            );
            return false;
        }
        self.events = events;
        self.events_month = Some(ticket.month);
        true
    }

    pub fn grid(&self, today: NaiveDate) -> CalendarGrid {
        build_grid(self.month, &self.events, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(title: &str, date: NaiveDate) -> Event {
        Event {
            id: None,
            event_id: None,
            title: title.to_string(),
            date,
            start_time: None,
            end_time: None,
            location: None,
            description: None,
            classes: vec![],
            guides: vec![],
        }
    }

    #[test]
    fn new_view_selects_first_of_month() {
        let view = MonthView::new(ymd(2025, 5, 17));
        assert_eq!(view.month(), ymd(2025, 5, 1));
        assert!(!view.is_fresh());
        assert_eq!(view.request().range(), DateRange::for_month(ymd(2025, 5, 1)));
    }

    #[test]
    fn current_ticket_is_applied() {
        let mut view = MonthView::new(ymd(2025, 5, 1));
        let ticket = view.request();
        assert!(view.apply(&ticket, vec![event("Assembly", ymd(2025, 5, 2))]));
        assert!(view.is_fresh());
        assert_eq!(view.events().len(), 1);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut view = MonthView::new(ymd(2025, 5, 1));
        let may = view.request();
        assert!(view.next());
        let june = view.request();
        assert_eq!(june.month(), ymd(2025, 6, 1));

        // June answers first, then the slow May response arrives.
        assert!(view.apply(&june, vec![event("June trip", ymd(2025, 6, 3))]));
        assert!(!view.apply(&may, vec![event("May assembly", ymd(2025, 5, 2))]));

        assert_eq!(view.events()[0].title, "June trip");
        assert!(view.is_fresh());
    }

    #[test]
    fn returning_to_a_month_still_rejects_its_old_ticket() {
        let mut view = MonthView::new(ymd(2025, 5, 1));
        let first_may = view.request();
        view.next();
        view.prev();
        assert_eq!(view.month(), ymd(2025, 5, 1));
        assert!(!view.is_current(&first_may));
        assert!(view.is_current(&view.request()));
    }

    #[test]
    fn stale_events_stay_until_fresh_ones_land() {
        let mut view = MonthView::new(ymd(2025, 5, 1));
        let may = view.request();
        view.apply(&may, vec![event("Assembly", ymd(2025, 5, 2))]);
        view.next();
        assert!(!view.is_fresh());
        assert_eq!(view.events().len(), 1);

        // The June grid shows nothing for a May event.
        let grid = view.grid(ymd(2025, 5, 1));
        assert!(grid.days().iter().all(|d| !d.has_events()));
    }

    #[test]
    fn navigate_jumps_to_month() {
        let mut view = MonthView::new(ymd(2025, 5, 1));
        view.navigate(ymd(2024, 12, 25));
        assert_eq!(view.month(), ymd(2024, 12, 1));
        assert!(view.prev());
        assert_eq!(view.month(), ymd(2024, 11, 1));

        let before = view.request();
        view.jump_today(ymd(2025, 5, 14));
        assert_eq!(view.month(), ymd(2025, 5, 1));
        assert!(!view.is_current(&before));
    }
}
