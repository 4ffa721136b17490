use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;
use portal_core::event::NewEvent;
use portal_core::session::Role;

use super::Context;
use crate::utils::tui::with_spinner;

pub async fn create(ctx: &Context, event: NewEvent) -> Result<()> {
    ctx.client.session()?.require_role(Role::Admin)?;
    event.validate()?;

    let created = with_spinner(format!("Adding {}", event.title), ctx.client.create_event(&event))
        .await
        .context("Could not add event")?;

    println!(
        "{}",
        format!("Created: {} on {}", created, created.date.format("%a %b %-d %Y")).green()
    );
    Ok(())
}
