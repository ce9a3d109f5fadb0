use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "tokdash",
    about = "Terminal dashboard for mock API token-usage statistics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Time window for the bucketed series: day, week, month, year
    #[arg(long, global = true)]
    pub range: Option<TimeRange>,

    /// Filter records to a single API key id
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Output format: table (default), json
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Seed for the synthetic record generator (omit for a fresh seed per run)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Load records from a JSON file instead of generating mock data
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Summary cards, per-model totals and the usage-records table (default)
    Dashboard,
    /// Per-model input/output token aggregates
    Models {
        /// Render a bar chart instead of a table
        #[arg(long)]
        chart: bool,
    },
    /// Time-bucketed total-token series over the selected range
    Series {
        /// Render a bar chart instead of a table
        #[arg(long)]
        chart: bool,
    },
}

/// The user-selected window controlling both the filter start date and the
/// bucket granularity. Unrecognized values are rejected at the parse
/// boundary (clap for the CLI, serde for the config file) rather than
/// falling through to an undefined series.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Last 24 hours, hourly buckets
    Day,
    /// Last 7 days, daily buckets
    Week,
    /// Last calendar month, daily buckets
    Month,
    /// Last calendar year, monthly buckets
    Year,
}

impl TimeRange {
    /// Fixed bucket count for the range: 24/7/30/12.
    pub fn bucket_count(&self) -> usize {
        match self {
            TimeRange::Day => 24,
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Year => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Day => "last 24 hours",
            TimeRange::Week => "last 7 days",
            TimeRange::Month => "last 30 days",
            TimeRange::Year => "last 12 months",
        }
    }
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    pub fn effective_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Dashboard)
    }
}
