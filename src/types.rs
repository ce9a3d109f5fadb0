use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single token-usage record as supplied by the record source.
///
/// `total_tokens` is deliberately not stored: it is always derived from
/// input + output so the invariant holds by construction, regardless of
/// what a JSON input file claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub api_key_id: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub last_used_at: DateTime<Utc>,
}

impl UsageRecord {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Per-model token totals. One per distinct model name, in first-seen
/// input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelAggregate {
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl ModelAggregate {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input_tokens: 0,
            output_tokens: 0,
        }
    }

    pub fn accumulate(&mut self, input_tokens: u64, output_tokens: u64) {
        self.input_tokens += input_tokens;
        self.output_tokens += output_tokens;
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Chronological time-bucketed token totals: `values[i]` is the total for
/// the bucket labelled `labels[i]`, oldest bucket first. Both vectors have
/// exactly the bucket count of the range they were built for, with empty
/// buckets at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeBucketSeries {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl TimeBucketSeries {
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }
}

/// Totals for the dashboard summary cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageSummary {
    pub total_tokens: u64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub active_keys: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_total_tokens_is_derived() {
        let r = UsageRecord {
            api_key_id: "sk_test_123456789".to_string(),
            model: "gpt-4".to_string(),
            input_tokens: 100,
            output_tokens: 50,
            last_used_at: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        };
        assert_eq!(r.total_tokens(), 150);
    }

    #[test]
    fn test_model_aggregate_accumulate() {
        let mut agg = ModelAggregate::new("gpt-4");
        agg.accumulate(100, 50);
        agg.accumulate(200, 0);
        assert_eq!(agg.input_tokens, 300);
        assert_eq!(agg.output_tokens, 50);
        assert_eq!(agg.total_tokens(), 350);
    }
}
