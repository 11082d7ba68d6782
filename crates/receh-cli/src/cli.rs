//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// RECEH - Expense summaries and categories for the household ledger
#[derive(Parser)]
#[command(name = "receh")]
#[command(about = "Expense aggregation and categorization for the RECEH dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Read the report from a saved JSON payload instead of the relay
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Relay URL (overrides config and RECEH_SOURCE_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that describe which slice of the ledger to look at
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Period: day, month, year (hari, bulan, tahun also accepted)
    #[arg(short, long, default_value = "month")]
    pub period: String,

    /// Month 1-12 (defaults to the current month)
    #[arg(short, long)]
    pub month: Option<u32>,

    /// Year (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Category filter: all, uncategorized, or a category name
    #[arg(short, long)]
    pub category: Option<String>,

    /// Free-text search over purpose, note and name
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page of the transaction list
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Hide a category from breakdown percentages (repeatable)
    #[arg(long = "hide")]
    pub hide: Vec<String>,

    /// Write predicted categories into records that have none
    #[arg(long)]
    pub backfill: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show period totals and daily average
    Summary {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// List transactions, newest first
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show spending per category
    Breakdown {
        #[command(flatten)]
        view: ViewArgs,

        /// Apply the category and search filters to the breakdown too
        #[arg(long)]
        filtered: bool,
    },

    /// Predict the category for a description
    Predict {
        /// Description text
        text: String,
    },

    /// Fill missing categories and report what changed
    Backfill,
}
