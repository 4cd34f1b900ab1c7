//! Steady CLI - Adaptive budgets for irregular income
//!
//! Usage:
//!   steady plan --file txs.csv            Compute this month's budget plan
//!   steady series --file txs.csv          Print chart series for the month
//!   steady categories                     Show the category keyword map
//!   steady serve --file txs.csv --port 3000   Start web server

mod cli;
mod commands;


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

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Plan {
            file,
            user,
            month,
            mode,
            buffer,
            json,
        } => {
            commands::cmd_plan(
                &file,
                &user,
                month.as_deref(),
                mode.as_deref(),
                buffer,
                json,
            )
            .await
        }
        Commands::Series {
            file,
            user,
            month,
            buffer,
        } => commands::cmd_series(&file, &user, month.as_deref(), buffer).await,
        Commands::Categories => commands::cmd_categories(),
        Commands::Serve {
            file,
            user,
            buffer,
            port,
            host,
        } => commands::cmd_serve(&file, &user, buffer, &host, port).await,
    }
}
