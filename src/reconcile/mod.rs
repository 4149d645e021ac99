//! Reconciliation logic for the Attendance Reconciliation Engine.
//!
//! This module contains the engine core: punch timestamp normalization,
//! punch-to-window matching, the per-day classification decision tree,
//! period aggregation, and the batch pipeline that orchestrates them over
//! bulk-fetched attendance data.

mod aggregator;
mod classifier;
mod matcher;
mod normalizer;
mod pipeline;
mod source;

pub use aggregator::{bad_days_by_month, detect_infractions, summarize};
pub use classifier::{DayContext, classify_day, is_weekend};
pub use matcher::{PunchMatch, match_punches};
pub use normalizer::{normalize_punches, parse_punch};
pub use pipeline::ReconciliationPipeline;
pub use source::{AttendanceSource, InMemorySource};
