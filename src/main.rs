mod client;
mod commands;
mod logging;
mod render;
mod utils;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use portal_core::config::PortalConfig;
use portal_core::event::NewEvent;
use portal_core::month;
use portal_core::session::Role;

use commands::Context;

#[derive(Parser)]
#[command(name = "portal", version)]
#[command(about = "Browse and manage the school event calendar")]
struct Cli {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: String,

        /// admin or guide (prompted if omitted)
        #[arg(short, long)]
        role: Option<Role>,
    },
    /// Forget the stored session
    Logout,
    /// Show the month grid
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<NaiveDate>,

        /// List each day's events below the grid
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show the next few events
    Upcoming,
    /// Page through months interactively
    Browse,
    /// Manage events
    Event {
        #[command(subcommand)]
        command: EventCommand,
    },
    /// List classes
    Classes,
    /// List guides
    Guides,
}

#[derive(Subcommand)]
enum EventCommand {
    /// Add an event (admin only)
    New {
        title: String,

        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Class id to invite (repeatable)
        #[arg(long = "class")]
        classes: Vec<String>,

        /// Guide id to assign (repeatable)
        #[arg(long = "guide")]
        guides: Vec<String>,
    },
}

fn parse_month_arg(s: &str) -> Result<NaiveDate, String> {
    month::parse_month(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PortalConfig::load()?;
    logging::init(&config.log_level)?;

    match cli.command {
        Commands::Login { email, role } => commands::login::run(&config, email, role).await,
        Commands::Logout => commands::logout::run(),
        Commands::Calendar { month, verbose } => {
            let ctx = Context::load(config, cli.today)?;
            commands::calendar::run(&ctx, month, verbose).await
        }
        Commands::Upcoming => {
            let ctx = Context::load(config, cli.today)?;
            commands::upcoming::run(&ctx).await
        }
        Commands::Browse => {
            let ctx = Context::load(config, cli.today)?;
            commands::browse::run(&ctx).await
        }
        Commands::Event {
            command:
                EventCommand::New {
                    title,
                    date,
                    start,
                    end,
                    location,
                    description,
                    classes,
                    guides,
                },
        } => {
            let ctx = Context::load(config, cli.today)?;
            let event = NewEvent {
                title,
                date,
                start_time: start,
                end_time: end,
                location,
                description,
                classes,
                guides,
            };
            commands::event::create(&ctx, event).await
        }
        Commands::Classes => {
            let ctx = Context::load(config, cli.today)?;
            commands::reference::classes(&ctx).await
        }
        Commands::Guides => {
            let ctx = Context::load(config, cli.today)?;
            commands::reference::guides(&ctx).await
        }
    }
}
