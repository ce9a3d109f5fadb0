mod aggregate;
mod cli;
mod config;
mod fixtures;
mod graph;
mod output;
mod types;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;

use cli::{Cli, Command, OutputFormat, TimeRange};
use types::UsageRecord;

fn load_records(path: &Path) -> Result<Vec<UsageRecord>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Invalid usage records in {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config();

    let range = cli.range.or(config.range).unwrap_or(TimeRange::Month);
    let format = cli.format.or(config.format).unwrap_or(OutputFormat::Table);

    let records = if let Some(ref path) = cli.input {
        load_records(path)?
    } else {
        // Each run gets a fresh seed unless --seed (or config.toml) pins one.
        let seed = cli
            .seed
            .or(config.seed)
            .unwrap_or_else(|| fastrand::u64(..));
        eprintln!("Generated mock usage data (seed {seed}).");
        fixtures::generate(seed, Utc::now())
    };

    let records: Vec<UsageRecord> = if let Some(ref key) = cli.api_key {
        records
            .into_iter()
            .filter(|r| &r.api_key_id == key)
            .collect()
    } else {
        records
    };

    if records.is_empty() {
        eprintln!("No usage records matched the filters.");
    }

    match cli.effective_command() {
        Command::Dashboard => {
            let summary = aggregate::summarize(&records);
            let models = aggregate::aggregate_by_model(&records);
            match format {
                OutputFormat::Json => output::print_json(&serde_json::json!({
                    "summary": summary,
                    "models": models,
                })),
                OutputFormat::Table => {
                    output::print_summary(&summary);
                    output::print_model_table(&models);
                    output::print_usage_table(&records);
                }
            }
        }
        Command::Models { chart } => {
            let models = aggregate::aggregate_by_model(&records);
            if chart {
                graph::render_model_chart(&models)?;
            } else {
                match format {
                    OutputFormat::Json => output::print_json(&models),
                    OutputFormat::Table => output::print_model_table(&models),
                }
            }
        }
        Command::Series { chart } => {
            let series = aggregate::bucket_by_time(&records, range, Local::now());
            if chart {
                graph::render_series_chart(&series, range.label())?;
            } else {
                match format {
                    OutputFormat::Json => output::print_json(&series),
                    OutputFormat::Table => output::print_series_table(&series),
                }
            }
        }
    }

    Ok(())
}
