//! Month grid for calendar views.
//!
//! A grid covers whole Monday-start weeks: it opens on the Monday on or before
//! the first of the month and closes on the Sunday on or after the last day,
//! so its length is always a multiple of seven. Grids are plain values; build
//! a new one whenever the month or the event list changes.

use chrono::{Datelike, Days, NaiveDate};

use crate::event::Event;
use crate::month;

pub const DAYS_IN_WEEK: usize = 7;

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day_number: u32,
    /// The day's month number equals the reference month's.
    pub is_current_month: bool,
    pub is_today: bool,
    /// Events dated on this day, in the order they were given.
    pub events: Vec<Event>,
}

impl CalendarDay {
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Day-of-month label; days that spill in from neighbouring months have
    /// none.
    pub fn label(&self) -> Option<u32> {
        self.is_current_month.then_some(self.day_number)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid {
    reference: NaiveDate,
    days: Vec<CalendarDay>,
}

impl CalendarGrid {
    /// The date the grid was built for (any day of the displayed month).
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Rows of seven days, Monday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks_exact(DAYS_IN_WEEK)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn today(&self) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.is_today)
    }

    /// Days of the displayed month that have at least one event.
    pub fn busy_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days
            .iter()
            .filter(|d| d.is_current_month && d.has_events())
    }
}

/// Build the grid for the month containing `reference`.
///
/// `events` are matched per day by exact date; the caller is expected to have
/// fetched them for the month already. `today` marks at most one cell.
pub fn build_grid(reference: NaiveDate, events: &[Event], today: NaiveDate) -> CalendarGrid {
    let (start, end) = grid_bounds(reference);
    let days = start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| CalendarDay {
            date,
            day_number: date.day(),
            is_current_month: date.month() == reference.month(),
            is_today: date == today,
            events: events.iter().filter(|e| e.date == date).cloned().collect(),
        })
        .collect();

    CalendarGrid { reference, days }
}

/// First and last day shown for the month containing `reference`.
pub fn grid_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        week_start(month::first_day(reference)),
        week_end(month::last_day(reference)),
    )
}

// Monday on or before `date`, clamped to the earliest representable date
fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN)
}

// Sunday on or after `date`, clamped to the latest representable date
fn week_end(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(6 - date.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MAX)
}
