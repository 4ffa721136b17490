use anyhow::Result;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::pluralize;

pub async fn classes(ctx: &Context) -> Result<()> {
    let classes = ctx.client.list_classes().await?;
    if classes.is_empty() {
        println!("{}", "No classes".dimmed());
        return Ok(());
    }

    for class in &classes {
        let id = class.class_id.as_deref().unwrap_or(&class.id);
        println!(
            "{}  {} {}",
            class.name.bold(),
            id.dimmed(),
            format!(
                "({} {})",
                class.total_students,
                pluralize("student", class.total_students as usize)
            )
            .dimmed()
        );
    }
    Ok(())
}

pub async fn guides(ctx: &Context) -> Result<()> {
    let guides = ctx.client.list_guides().await?;
    if guides.is_empty() {
        println!("{}", "No guides".dimmed());
        return Ok(());
    }

    for guide in &guides {
        let email = guide.email.as_deref().unwrap_or("");
        println!("{}  {} {}", guide.name.bold(), guide.id.dimmed(), email.dimmed());
    }
    Ok(())
}
