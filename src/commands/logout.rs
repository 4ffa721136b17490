use anyhow::Result;
use owo_colors::OwoColorize;
use portal_core::session::Session;

pub fn run() -> Result<()> {
    if Session::clear()? {
        println!("Logged out");
    } else {
        println!("{}", "Not logged in".dimmed());
    }
    Ok(())
}
