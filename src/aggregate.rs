use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Timelike};

use crate::cli::TimeRange;
use crate::types::{ModelAggregate, TimeBucketSeries, UsageRecord, UsageSummary};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Group records by exact model-name equality, summing input and output
/// tokens independently. Output order is first-seen order of the model in
/// the input, so repeated runs over the same records chart identically.
pub fn aggregate_by_model(records: &[UsageRecord]) -> Vec<ModelAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut aggregates: Vec<ModelAggregate> = Vec::new();

    for r in records {
        let slot = match index.get(r.model.as_str()) {
            Some(&i) => i,
            None => {
                aggregates.push(ModelAggregate::new(r.model.clone()));
                index.insert(r.model.as_str(), aggregates.len() - 1);
                aggregates.len() - 1
            }
        };
        aggregates[slot].accumulate(r.input_tokens, r.output_tokens);
    }

    aggregates
}

/// Totals for the summary cards, including the distinct API-key count.
pub fn summarize(records: &[UsageRecord]) -> UsageSummary {
    let mut summary = UsageSummary::default();
    let mut keys: HashSet<&str> = HashSet::new();

    for r in records {
        summary.input_tokens += r.input_tokens;
        summary.output_tokens += r.output_tokens;
        keys.insert(r.api_key_id.as_str());
    }

    summary.total_tokens = summary.input_tokens + summary.output_tokens;
    summary.active_keys = keys.len();
    summary
}

/// Start of the filter window: `now` minus the range's span.
///
/// Month and year use calendar arithmetic, which clamps day-of-month
/// overflow (Mar 31 minus one month is the last day of February). The
/// fixed-span fallback only triggers when the clamped wall-clock time does
/// not exist in the target zone (DST gap).
fn window_start<Tz: TimeZone>(range: TimeRange, now: &DateTime<Tz>) -> DateTime<Tz> {
    match range {
        TimeRange::Day => now.clone() - Duration::days(1),
        TimeRange::Week => now.clone() - Duration::days(7),
        TimeRange::Month => now
            .clone()
            .checked_sub_months(Months::new(1))
            .unwrap_or_else(|| now.clone() - Duration::days(30)),
        TimeRange::Year => now
            .clone()
            .checked_sub_months(Months::new(12))
            .unwrap_or_else(|| now.clone() - Duration::days(365)),
    }
}

/// Bucket record totals into the range's fixed time grid, aligned to `now`.
///
/// Generic over the time zone so the caller injects both the reference
/// instant and the calendar: the binary passes `Local::now()` (midnight
/// and month boundaries follow the local calendar), tests pass fixed UTC
/// instants. Records outside the window are filtered first; anything that
/// still lands outside the grid (future timestamps, the day-31 tail of a
/// calendar month) is dropped rather than miscounted.
pub fn bucket_by_time<Tz: TimeZone>(
    records: &[UsageRecord],
    range: TimeRange,
    now: DateTime<Tz>,
) -> TimeBucketSeries {
    let start = window_start(range, &now);
    let tz = now.timezone();
    let n = range.bucket_count();

    let filtered: Vec<&UsageRecord> = records.iter().filter(|r| r.last_used_at >= start).collect();

    let mut labels = Vec::with_capacity(n);
    let mut values = vec![0u64; n];

    match range {
        TimeRange::Day => {
            // Chronological: labels[0] is 23 hours ago, labels[23] is the
            // current hour.
            for i in 0..n {
                let t = now.clone() - Duration::hours((n - 1 - i) as i64);
                labels.push(format!("{:02}:00", t.hour()));
            }
            for r in &filtered {
                let secs = now
                    .clone()
                    .signed_duration_since(&r.last_used_at)
                    .num_seconds();
                let hours = secs.div_euclid(3600);
                if (0..n as i64).contains(&hours) {
                    values[n - 1 - hours as usize] += r.total_tokens();
                }
            }
        }
        TimeRange::Week | TimeRange::Month => {
            // Daily buckets with the boundary at midnight in the injected
            // zone: a record late yesterday and one early today land in
            // different buckets regardless of how few hours separate them.
            let today = now.date_naive();
            for i in 0..n {
                let d = today - Duration::days((n - 1 - i) as i64);
                let label = match range {
                    TimeRange::Week => WEEKDAYS[d.weekday().num_days_from_monday() as usize]
                        .to_string(),
                    _ => format!("{} {}", MONTHS[d.month0() as usize], d.day()),
                };
                labels.push(label);
            }
            for r in &filtered {
                let d = r.last_used_at.with_timezone(&tz).date_naive();
                let days = (today - d).num_days();
                if (0..n as i64).contains(&days) {
                    values[n - 1 - days as usize] += r.total_tokens();
                }
            }
        }
        TimeRange::Year => {
            // Monthly buckets keyed by calendar-month difference;
            // day-of-month plays no part once a record passes the filter.
            for i in 0..n {
                let idx = (now.month0() as i64 - (n - 1 - i) as i64).rem_euclid(12);
                labels.push(MONTHS[idx as usize].to_string());
            }
            for r in &filtered {
                let d = r.last_used_at.with_timezone(&tz);
                let diff =
                    (now.year() - d.year()) * 12 + (now.month() as i32 - d.month() as i32);
                if (0..n as i32).contains(&diff) {
                    values[n - 1 - diff as usize] += r.total_tokens();
                }
            }
        }
    }

    TimeBucketSeries { labels, values }
}
