//! Interactive month browser.
//!
//! Every navigation spawns a fetch for the newly selected month. Fetches may
//! overlap; their results come back over a channel and [`MonthView`] drops
//! any that belong to a month the user has already moved away from.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use portal_core::PortalResult;
use portal_core::event::Event;
use portal_core::view::{FetchTicket, MonthView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::Context;
use crate::client::ApiClient;
use crate::render::Render;

type FetchResult = (FetchTicket, PortalResult<Vec<Event>>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Prev,
    Today,
    Quit,
}

impl Action {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Some(Action::Next),
            "p" | "prev" => Some(Action::Prev),
            "t" | "today" => Some(Action::Today),
            "q" | "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Move the view. Returns `false` when the view could not move.
fn navigate(view: &mut MonthView, action: Action, today: NaiveDate) -> bool {
    match action {
        Action::Next => view.next(),
        Action::Prev => view.prev(),
        Action::Today => {
            view.jump_today(today);
            true
        }
        Action::Quit => false,
    }
}

fn spawn_fetch(client: &Arc<ApiClient>, ticket: FetchTicket, tx: &mpsc::UnboundedSender<FetchResult>) {
    let client = Arc::clone(client);
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = client.list_events(&ticket.range()).await;
        // Receiver is gone once the browser exits
        let _ = tx.send((ticket, result));
    });
}

fn draw(view: &MonthView, today: NaiveDate) {
    println!();
    println!("{}", view.grid(today).render());
    if !view.is_fresh() {
        println!("{}", "loading...".dimmed());
    }
    println!("{}", "[n]ext  [p]rev  [t]oday  [q]uit".dimmed());
}

pub async fn run(ctx: &Context) -> Result<()> {
    ctx.client.session()?;
    let today = ctx.today.date();

    let mut view = MonthView::new(today);
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchResult>();
    spawn_fetch(&ctx.client, view.request(), &tx);
    draw(&view, today);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                let Some(action) = Action::parse(&line) else {
                    println!("{}", format!("Unknown command '{}'", line.trim()).yellow());
                    continue;
                };
                if action == Action::Quit {
                    break;
                }
                if navigate(&mut view, action, today) {
                    tracing::debug!(month = %view.month(), "navigated");
                    spawn_fetch(&ctx.client, view.request(), &tx);
                    draw(&view, today);
                } else {
                    println!("{}", "No further months".yellow());
                }
            }
            Some((ticket, result)) = rx.recv() => {
                match result {
                    Ok(events) => {
                        if view.apply(&ticket, events) {
                            draw(&view, today);
                        }
                    }
                    Err(e) if view.is_current(&ticket) => {
                        eprintln!("{}", format!("Failed to fetch events: {e}").red());
                    }
                    Err(e) => {
                        tracing::debug!(month = %ticket.month(), error = %e, "ignoring failed fetch for a stale month");
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_short_and_long_commands() {
        assert_eq!(Action::parse("n"), Some(Action::Next));
        assert_eq!(Action::parse(" PREV\n"), Some(Action::Prev));
        assert_eq!(Action::parse("today"), Some(Action::Today));
        assert_eq!(Action::parse("q"), Some(Action::Quit));
        assert_eq!(Action::parse("x"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn navigation_moves_month_and_supersedes_fetches() {
        let today = ymd(2025, 5, 14);
        let mut view = MonthView::new(today);
        let first = view.request();

        assert!(navigate(&mut view, Action::Next, today));
        assert_eq!(view.month(), ymd(2025, 6, 1));
        assert!(!view.is_current(&first));

        assert!(navigate(&mut view, Action::Prev, today));
        assert!(navigate(&mut view, Action::Prev, today));
        assert_eq!(view.month(), ymd(2025, 4, 1));

        assert!(navigate(&mut view, Action::Today, today));
        assert_eq!(view.month(), ymd(2025, 5, 1));
        assert!(!navigate(&mut view, Action::Quit, today));
    }
}
