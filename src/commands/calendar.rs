use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use portal_core::build_grid;
use portal_core::date_range::DateRange;
use portal_core::session::Role;

use super::Context;
use crate::render::{Render, pluralize, render_agenda};
use crate::utils::tui::with_spinner;

pub async fn run(ctx: &Context, month: Option<NaiveDate>, verbose: bool) -> Result<()> {
    let session = ctx.client.session()?;
    let today = ctx.today.date();
    let reference = month.unwrap_or(today);
    let range = DateRange::for_month(reference);

    let label = format!("Fetching events for {}", portal_core::month::label(reference));
    let events = with_spinner(label, ctx.client.list_events(&range))
        .await
        .context("Could not load the calendar")?;

    let grid = build_grid(reference, &events, today);
    println!("{}", grid.render());

    if session.role == Role::Admin {
        let (classes, guides) =
            tokio::try_join!(ctx.client.list_classes(), ctx.client.list_guides())
                .context("Could not load school totals")?;
        println!();
        println!(
            "{}",
            format!(
                "{} {}, {} {}",
                classes.len(),
                pluralize("class", classes.len()),
                guides.len(),
                pluralize("guide", guides.len())
            )
            .dimmed()
        );
    }

    if verbose {
        println!();
        println!("{}", render_agenda(&grid));
    } else {
        let count = events.len();
        println!("{}", format!("{count} {} this month", pluralize("event", count)).dimmed());
    }

    Ok(())
}
