//! RECEH CLI - Expense dashboard engine on the command line
//!
//! Usage:
//!   receh summary --period month        Period totals and daily average
//!   receh list --search kopi --page 2   Filtered transaction list
//!   receh breakdown --hide Tagihan      Spending per category
//!   receh predict "beli pertalite"      Category for a description
//!   receh backfill --file laporan.json  Fill missing categories

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let Cli {
        file,
        url,
        config,
        json,
        command,
        ..
    } = cli;

    match command {
        Commands::Predict { text } => {
            let config = commands::load_config(config.as_deref(), url.as_deref())?;
            commands::cmd_predict(&config.categories, &text, json)
        }
        Commands::Summary { view } => {
            let session =
                commands::Session::load(file.as_deref(), url.as_deref(), config.as_deref()).await?;
            commands::cmd_summary(&session, &view, json)
        }
        Commands::List { view } => {
            let session =
                commands::Session::load(file.as_deref(), url.as_deref(), config.as_deref()).await?;
            commands::cmd_list(&session, &view, json)
        }
        Commands::Breakdown { view, filtered } => {
            let session =
                commands::Session::load(file.as_deref(), url.as_deref(), config.as_deref()).await?;
            commands::cmd_breakdown(&session, &view, filtered, json)
        }
        Commands::Backfill => {
            let session =
                commands::Session::load(file.as_deref(), url.as_deref(), config.as_deref()).await?;
            commands::cmd_backfill(session, json)
        }
    }
}
