use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use portal_core::config::PortalConfig;
use portal_core::session::Role;

use crate::client::ApiClient;
use crate::utils::tui::with_spinner;

pub async fn run(config: &PortalConfig, email: String, role: Option<Role>) -> Result<()> {
    let role = match role {
        Some(role) => role,
        None => prompt_role()?,
    };
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let client = ApiClient::new(&config.api_url, None)?;
    let session = with_spinner(
        format!("Logging in as {email}"),
        client.login(&email, &password, role),
    )
    .await?;
    session.save().context("Failed to store session")?;

    println!(
        "Logged in as {} {}",
        session.email.bold(),
        format!("({})", session.role).dimmed()
    );
    Ok(())
}

fn prompt_role() -> Result<Role> {
    let roles = [Role::Admin, Role::Guide];
    let selected = dialoguer::Select::new()
        .with_prompt("Log in as")
        .items(&roles)
        .default(0)
        .interact()
        .context("Failed to read role")?;

    roles
        .get(selected)
        .copied()
        .context("No role selected")
}
