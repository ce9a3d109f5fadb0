use chrono::{DateTime, Duration, Utc};
use fastrand::Rng;

use crate::types::UsageRecord;

pub const MOCK_API_KEYS: [&str; 4] = [
    "sk_test_123456789",
    "sk_live_abcdefghijk",
    "sk_test_987654321",
    "sk_live_zyxwvutsrqp",
];

pub const MOCK_MODELS: [&str; 6] = [
    "gpt-4",
    "gpt-3.5-turbo",
    "claude-3-opus",
    "claude-3-sonnet",
    "llama-3-70b",
    "gemini-pro",
];

/// Generate synthetic usage records: 1-3 distinct models per mock API key,
/// token counts and last-used dates drawn from a seeded RNG so the same
/// seed always reproduces the same dataset.
pub fn generate(seed: u64, now: DateTime<Utc>) -> Vec<UsageRecord> {
    let mut rng = Rng::with_seed(seed);
    let mut records = Vec::new();

    for key in MOCK_API_KEYS {
        let num_models = rng.usize(1..=3);
        let mut used: Vec<&str> = Vec::new();

        for _ in 0..num_models {
            let model = MOCK_MODELS[rng.usize(..MOCK_MODELS.len())];
            if used.contains(&model) {
                continue;
            }
            used.push(model);

            let days_ago = rng.i64(0..30);
            records.push(UsageRecord {
                api_key_id: key.to_string(),
                model: model.to_string(),
                input_tokens: rng.u64(10_000..510_000),
                output_tokens: rng.u64(5_000..305_000),
                last_used_at: now - Duration::days(days_ago),
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_same_seed_same_records() {
        assert_eq!(generate(42, fixed_now()), generate(42, fixed_now()));
    }

    #[test]
    fn test_different_seeds_diverge() {
        assert_ne!(generate(1, fixed_now()), generate(2, fixed_now()));
    }

    #[test]
    fn test_generated_records_respect_bounds() {
        let now = fixed_now();
        let records = generate(7, now);
        assert!(!records.is_empty());

        for r in &records {
            assert!(MOCK_API_KEYS.contains(&r.api_key_id.as_str()));
            assert!(MOCK_MODELS.contains(&r.model.as_str()));
            assert!((10_000..510_000).contains(&r.input_tokens));
            assert!((5_000..305_000).contains(&r.output_tokens));
            assert!(r.last_used_at <= now);
            assert!(r.last_used_at > now - Duration::days(30));
        }
    }

    #[test]
    fn test_models_distinct_per_key() {
        let records = generate(99, fixed_now());
        for key in MOCK_API_KEYS {
            let models: Vec<&str> = records
                .iter()
                .filter(|r| r.api_key_id == key)
                .map(|r| r.model.as_str())
                .collect();
            let mut sorted = models.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(models.len(), sorted.len());
        }
    }
}
