//! Punch timestamp normalization.
//!
//! Raw device rows arrive unordered, duplicated by sensor re-reads and
//! shifted by legacy seasonal clock policies. This module turns one
//! employee's raw rows into clean, ordered per-day punch lists.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::config::{NormalizerConfig, SeasonalOffsetRule};

/// Timestamp format written by the clock devices.
const DEVICE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Fallback format for exports that use a `T` separator.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// First month (inclusive) of the summer window the seasonal rules use.
const SUMMER_FIRST_MONTH: u32 = 4;
/// Last month (inclusive) of the summer window the seasonal rules use.
const SUMMER_LAST_MONTH: u32 = 10;

/// Parses a raw device timestamp.
///
/// Accepts the device format (`2025-03-10 08:02:17`) and falls back to
/// the ISO separator variant (`2025-03-10T08:02:17`). Returns `None` for
/// anything else.
///
/// # Example
///
/// ```
/// use attendance_engine::reconcile::parse_punch;
///
/// assert!(parse_punch("2025-03-10 08:02:17").is_some());
/// assert!(parse_punch("2025-03-10T08:02:17").is_some());
/// assert!(parse_punch("yesterday at eight").is_none());
/// ```
pub fn parse_punch(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DEVICE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, ISO_FORMAT))
        .ok()
}

/// The clock correction for one punch under a seasonal rule.
///
/// The season is judged from the recorded timestamp itself, before any
/// adjustment.
fn seasonal_offset(rule: SeasonalOffsetRule, timestamp: NaiveDateTime) -> Duration {
    let summer = (SUMMER_FIRST_MONTH..=SUMMER_LAST_MONTH).contains(&timestamp.month());
    match rule {
        SeasonalOffsetRule::SummerForwardWinterBack => {
            if summer {
                Duration::hours(1)
            } else {
                Duration::hours(-1)
            }
        }
        SeasonalOffsetRule::SummerForwardOnly => {
            if summer {
                Duration::hours(1)
            } else {
                Duration::zero()
            }
        }
        SeasonalOffsetRule::None => Duration::zero(),
    }
}

/// Normalizes one employee's raw punch rows into per-day punch lists.
///
/// Steps, in order:
/// 1. Parse every row; unparseable rows are dropped with a warning and
///    never fail the day.
/// 2. Sort ascending and collapse any timestamp within the dedup window
///    (inclusive) of the previously kept one. A cluster of device
///    re-reads always keeps its first punch.
/// 3. Apply the configured seasonal offset per punch.
/// 4. Bucket by the adjusted date, so a punch pushed past midnight lands
///    on the day it now belongs to.
///
/// # Arguments
///
/// * `employee_id` - Used only for the data-quality warning on bad rows
/// * `raw_timestamps` - The employee's raw rows for the fetched range
/// * `config` - Dedup window and seasonal offset rule
///
/// # Returns
///
/// A map from date to that day's punches, each day ordered ascending.
///
/// # Example
///
/// ```
/// use attendance_engine::config::{NormalizerConfig, SeasonalOffsetRule};
/// use attendance_engine::reconcile::normalize_punches;
/// use chrono::NaiveDate;
///
/// let config = NormalizerConfig {
///     dedup_window_seconds: 30,
///     seasonal_offset_rule: SeasonalOffsetRule::None,
/// };
/// let days = normalize_punches(
///     "emp_001",
///     &["2025-03-10 17:02:00", "2025-03-10 08:00:10", "2025-03-10 08:00:00"],
///     &config,
/// );
///
/// let day = &days[&NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()];
/// assert_eq!(day.len(), 2); // the 08:00:10 re-read collapsed
/// ```
pub fn normalize_punches(
    employee_id: &str,
    raw_timestamps: &[&str],
    config: &NormalizerConfig,
) -> BTreeMap<NaiveDate, Vec<NaiveDateTime>> {
    let mut parsed: Vec<NaiveDateTime> = Vec::with_capacity(raw_timestamps.len());
    for raw in raw_timestamps {
        match parse_punch(raw) {
            Some(timestamp) => parsed.push(timestamp),
            None => {
                warn!(employee_id, raw_timestamp = raw, "Dropping unparseable punch");
            }
        }
    }

    parsed.sort_unstable();

    let window = Duration::seconds(config.dedup_window_seconds);
    let mut kept: Vec<NaiveDateTime> = Vec::with_capacity(parsed.len());
    for timestamp in parsed {
        match kept.last() {
            Some(previous) if timestamp - *previous <= window => {}
            _ => kept.push(timestamp),
        }
    }

    let mut days: BTreeMap<NaiveDate, Vec<NaiveDateTime>> = BTreeMap::new();
    for timestamp in kept {
        let adjusted = timestamp + seasonal_offset(config.seasonal_offset_rule, timestamp);
        days.entry(adjusted.date()).or_default().push(adjusted);
    }

    // Offsets flip direction at season boundaries, so re-sort each bucket.
    for punches in days.values_mut() {
        punches.sort_unstable();
    }

    days
}
