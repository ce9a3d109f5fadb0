use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use crate::types::{ModelAggregate, TimeBucketSeries, UsageRecord, UsageSummary};

pub fn format_tokens(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Mask an API key for display: first 8 and last 4 characters only.
/// Keys too short to mask are shown as-is.
pub fn mask_api_key(key: &str) -> String {
    if key.len() <= 12 {
        return key.to_string();
    }
    format!("{}...{}", &key[..8], &key[key.len() - 4..])
}

fn format_last_used(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// The dashboard's summary cards as a single-row table.
pub fn print_summary(summary: &UsageSummary) {
    let mut table = new_table();
    table.set_header(vec![
        "Total Tokens",
        "Input Tokens",
        "Output Tokens",
        "Active Keys",
    ]);
    table.add_row(vec![
        Cell::new(format_tokens(summary.total_tokens)),
        Cell::new(format_tokens(summary.input_tokens)),
        Cell::new(format_tokens(summary.output_tokens)),
        Cell::new(summary.active_keys),
    ]);
    println!("{table}");
}

/// Per-model aggregates in first-seen order, with a TOTAL row.
pub fn print_model_table(aggregates: &[ModelAggregate]) {
    let mut table = new_table();
    table.set_header(vec!["Model", "Input", "Output", "Total"]);

    let mut totals = ModelAggregate::new("TOTAL");
    for agg in aggregates {
        table.add_row(vec![
            Cell::new(&agg.model),
            Cell::new(format_tokens(agg.input_tokens)),
            Cell::new(format_tokens(agg.output_tokens)),
            Cell::new(format_tokens(agg.total_tokens())),
        ]);
        totals.accumulate(agg.input_tokens, agg.output_tokens);
    }

    table.add_row(vec![
        Cell::new("TOTAL"),
        Cell::new(format_tokens(totals.input_tokens)),
        Cell::new(format_tokens(totals.output_tokens)),
        Cell::new(format_tokens(totals.total_tokens())),
    ]);

    println!("{table}");
}

/// One row per record, sorted by total tokens descending, API keys masked.
pub fn print_usage_table(records: &[UsageRecord]) {
    let mut table = new_table();
    table.set_header(vec![
        "API Key",
        "Model",
        "Input",
        "Output",
        "Total",
        "Last Used",
    ]);

    let mut sorted: Vec<&UsageRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.total_tokens().cmp(&a.total_tokens()));

    for r in sorted {
        table.add_row(vec![
            Cell::new(mask_api_key(&r.api_key_id)),
            Cell::new(&r.model),
            Cell::new(format_tokens(r.input_tokens)),
            Cell::new(format_tokens(r.output_tokens)),
            Cell::new(format_tokens(r.total_tokens())),
            Cell::new(format_last_used(r.last_used_at)),
        ]);
    }

    println!("{table}");
}

/// The bucketed series as a Period/Tokens table with a TOTAL row.
pub fn print_series_table(series: &TimeBucketSeries) {
    let mut table = new_table();
    table.set_header(vec!["Period", "Tokens"]);

    for (label, value) in series.labels.iter().zip(&series.values) {
        table.add_row(vec![Cell::new(label), Cell::new(format_tokens(*value))]);
    }
    table.add_row(vec![
        Cell::new("TOTAL"),
        Cell::new(format_tokens(series.total())),
    ]);

    println!("{table}");
}

pub fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("JSON serialization failed")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tokens_scales() {
        assert_eq!(format_tokens(950), "950");
        assert_eq!(format_tokens(1_500), "1.5K");
        assert_eq!(format_tokens(2_340_000), "2.3M");
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("sk_live_abcdefghijk"), "sk_live_...hijk");
        assert_eq!(mask_api_key("short_key"), "short_key");
    }
}
