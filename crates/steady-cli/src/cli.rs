//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Steady - Adaptive budgets for irregular income
#[derive(Parser)]
#[command(name = "steady")]
#[command(about = "Adaptive budget engine for gig workers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a budget plan from a transaction CSV
    Plan {
        /// Transaction snapshot CSV (id,date,amount,category,merchant)
        #[arg(short, long)]
        file: PathBuf,

        /// User id the snapshot belongs to
        #[arg(short, long, default_value = "local")]
        user: String,

        /// Plan month, YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Force a mode: survival, normal, growth
        #[arg(long)]
        mode: Option<String>,

        /// Current emergency-buffer balance
        #[arg(short, long, default_value = "0")]
        buffer: f64,

        /// Emit the raw JSON computation instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Print chart series (daily spend, buffer projection) for a month
    Series {
        /// Transaction snapshot CSV
        #[arg(short, long)]
        file: PathBuf,

        /// User id the snapshot belongs to
        #[arg(short, long, default_value = "local")]
        user: String,

        /// Plan month, YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Current emergency-buffer balance
        #[arg(short, long, default_value = "0")]
        buffer: f64,
    },

    /// Show the active category keyword map
    Categories,

    /// Start the web server over a CSV snapshot
    Serve {
        /// Transaction snapshot CSV backing the API
        #[arg(short, long)]
        file: PathBuf,

        /// User id the snapshot belongs to
        #[arg(short, long, default_value = "local")]
        user: String,

        /// Current emergency-buffer balance
        #[arg(short, long, default_value = "0")]
        buffer: f64,

        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}
