//! Period summary model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated counts of day statuses over a reporting period.
///
/// `justified` merges holiday-justified and leave-justified days;
/// not-applicable days never reach any count. `bad_days` lists the dates
/// classified as absence or major lateness, ascending.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PeriodSummary;
///
/// let first = PeriodSummary {
///     on_time: 10,
///     absence: 1,
///     ..Default::default()
/// };
/// let second = PeriodSummary {
///     on_time: 8,
///     late_minor: 2,
///     ..Default::default()
/// };
///
/// let merged = first.merge(second);
/// assert_eq!(merged.on_time, 18);
/// assert_eq!(merged.late_minor, 2);
/// assert_eq!(merged.absence, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Days clocked in within tolerance.
    pub on_time: u32,
    /// Days in the minor lateness band.
    pub late_minor: u32,
    /// Days beyond the minor lateness band.
    pub late_major: u32,
    /// Days with no matched punches that required presence.
    pub absence: u32,
    /// Days with a clock-out but no clock-in.
    pub missing_checkin: u32,
    /// Days with a clock-in but no clock-out.
    pub missing_checkout: u32,
    /// Weekend rest days.
    pub rest: u32,
    /// Days justified by a holiday or an authorized leave.
    pub justified: u32,
    /// Dates flagged as absence or major lateness, ascending.
    pub bad_days: Vec<NaiveDate>,
}

impl PeriodSummary {
    /// Combines two summaries into one.
    ///
    /// The combination is associative, so shards split by employee or by
    /// sub-period can be folded in any grouping without changing the
    /// result.
    pub fn merge(mut self, other: PeriodSummary) -> PeriodSummary {
        self.on_time += other.on_time;
        self.late_minor += other.late_minor;
        self.late_major += other.late_major;
        self.absence += other.absence;
        self.missing_checkin += other.missing_checkin;
        self.missing_checkout += other.missing_checkout;
        self.rest += other.rest;
        self.justified += other.justified;
        self.bad_days.extend(other.bad_days);
        self.bad_days.sort_unstable();
        self.bad_days.dedup();
        self
    }

    /// Number of flagged days: absences plus major latenesses.
    pub fn infraction_count(&self) -> u32 {
        self.absence + self.late_major
    }
}
