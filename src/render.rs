//! Terminal rendering for portal types.
//!
//! Layout is computed on plain text first and colored afterwards, so column
//! widths are not thrown off by escape codes.

use owo_colors::OwoColorize;
use portal_core::event::Event;
use portal_core::grid::{CalendarDay, CalendarGrid};
use portal_core::month;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Columns per day cell, including the gap after it
const CELL_WIDTH: usize = 6;

/// Plain text of one cell: `" 12 "`, `"[12]"` for today, blank for days from
/// neighbouring months, then `*` when the day has events.
pub fn cell_text(day: &CalendarDay) -> String {
    let label = match day.label() {
        Some(n) if day.is_today => format!("[{n:>2}]"),
        Some(n) => format!(" {n:>2} "),
        None if day.is_today => "[  ]".to_string(),
        None => "    ".to_string(),
    };
    let marker = if day.has_events() { '*' } else { ' ' };
    format!("{label}{marker}")
}

fn header_text() -> String {
    WEEKDAYS
        .iter()
        .map(|wd| format!("{wd:<width$}", width = CELL_WIDTH))
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn colorize_cell(day: &CalendarDay, text: &str) -> String {
    if day.is_today {
        text.bold().reversed().to_string()
    } else if day.has_events() && day.is_current_month {
        text.cyan().to_string()
    } else if day.has_events() {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

impl Render for CalendarGrid {
    fn render(&self) -> String {
        let mut lines = Vec::new();
        let title = month::label(self.reference());
        let width = CELL_WIDTH * WEEKDAYS.len() - 1;
        lines.push(format!("{:^width$}", title).bold().to_string());
        lines.push(header_text().dimmed().to_string());

        for week in self.weeks() {
            let row: Vec<String> = week
                .iter()
                .map(|day| colorize_cell(day, &cell_text(day)))
                .collect();
            lines.push(row.join(" "));
        }

        lines.join("\n")
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let time = self.time_span().unwrap_or_else(|| "all-day".to_string());
        let mut line = format!("{:>11}  {}", time.dimmed(), self.title);

        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            line.push_str(&format!(" {}", format!("@ {location}").dimmed()));
        }
        let classes = self.class_names();
        if !classes.is_empty() {
            line.push_str(&format!(" {}", format!("[{}]", classes.join(", ")).dimmed()));
        }
        let guides = self.guide_names();
        if !guides.is_empty() {
            line.push_str(&format!(" {}", format!("with {}", guides.join(", ")).dimmed()));
        }
        line
    }
}

/// Each day of the displayed month that has events, with its events.
pub fn render_agenda(grid: &CalendarGrid) -> String {
    let mut lines = Vec::new();

    for day in grid.busy_days() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let label = day.date.format("%a %b %-d").to_string();
        lines.push(if day.is_today {
            format!("{} {}", label.bold(), "(today)".dimmed())
        } else {
            label.bold().to_string()
        });
        for event in &day.events {
            lines.push(format!("  {}", event.render()));
        }
    }

    if lines.is_empty() {
        return "No events this month".dimmed().to_string();
    }
    lines.join("\n")
}

pub fn render_upcoming(events: &[Event]) -> String {
    if events.is_empty() {
        return "No upcoming events".dimmed().to_string();
    }

    events
        .iter()
        .map(|event| {
            let date = event.date.format("%a %b %-d").to_string();
            format!("{:<11} {}", date.bold(), event.render())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else if word.ends_with('s') {
        format!("{word}es")
    } else {
        format!("{word}s")
    }
}
