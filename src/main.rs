mod client;
mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use datebook_core::config::DatebookConfig;
use datebook_core::{DateKey, YearMonth};

use client::Client;

#[derive(Parser)]
#[command(name = "datebook")]
#[command(about = "A month calendar backed by a datebook server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month grid and its events (default)
    Show {
        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// Browse months interactively and add events
    Browse {
        /// Month to start on as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// Add an event on a date
    Add {
        /// Date as YYYY-MM-DD
        date: DateKey,

        /// Event title
        title: String,

        /// Event description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List events between two dates, inclusive
    Events {
        /// First date as YYYY-MM-DD
        #[arg(short, long)]
        start: DateKey,

        /// Last date as YYYY-MM-DD
        #[arg(short, long)]
        end: DateKey,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = DatebookConfig::load()?;
    let client = Client::connect(&config).await?;
    let today = chrono::Local::now().date_naive();
    let this_month = YearMonth::containing(today);

    match cli.command.unwrap_or(Commands::Show { month: None }) {
        Commands::Show { month } => commands::show::run(&client, month.unwrap_or(this_month), today).await,
        Commands::Browse { month } => commands::browse::run(&client, month.unwrap_or(this_month), today).await,
        Commands::Add {
            date,
            title,
            description,
        } => commands::add::run(&client, date, title, description).await,
        Commands::Events { start, end } => commands::events::run(&client, start, end).await,
    }
}
