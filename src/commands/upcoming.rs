use anyhow::{Context as _, Result};
use portal_core::date_range::DateRange;
use portal_core::upcoming::upcoming;

use super::Context;
use crate::render::render_upcoming;
use crate::utils::tui::with_spinner;

pub async fn run(ctx: &Context) -> Result<()> {
    let today = ctx.today.date();
    let horizon = ctx.config.upcoming_horizon(today);
    let range = DateRange::upcoming(ctx.today.now(), horizon);

    let events = with_spinner("Fetching upcoming events", ctx.client.list_upcoming_events(&range))
        .await
        .context("Could not load upcoming events")?;

    println!("{}", render_upcoming(&upcoming(events)));
    Ok(())
}
