//! Daily classification models.
//!
//! This module defines [`DayStatus`], the closed set of classifications the
//! engine can assign to an employee-day, and [`DayRecord`], the per-day
//! reconciliation outcome.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The single classification assigned to an employee-day.
///
/// Exactly one status applies per day. The variants are listed in the
/// priority order the classifier evaluates them: a rest day outranks a
/// holiday, a holiday outranks leave, and so on down to punch omissions.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DayStatus;
///
/// assert_eq!(serde_json::to_string(&DayStatus::LateMinor).unwrap(), "\"late_minor\"");
/// assert!(DayStatus::Absence.is_infraction());
/// assert!(!DayStatus::OnTime.is_infraction());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// Day outside the evaluable range (today or later, or before hire).
    NotApplicable,
    /// Weekend rest day.
    Rest,
    /// Covered by a company-wide holiday, with no punches recorded.
    JustifiedHoliday,
    /// Covered by an authorized leave interval.
    JustifiedLeave,
    /// No punches matched on a day that required presence.
    Absence,
    /// Clocked in within the check-in tolerance.
    OnTime,
    /// Clocked in late, within the minor lateness band.
    LateMinor,
    /// Clocked in late, beyond the minor lateness band.
    LateMajor,
    /// A clock-out exists but no clock-in.
    MissingCheckin,
    /// A clock-in exists but no clock-out.
    MissingCheckout,
}

impl DayStatus {
    /// Returns true when the status participates in period totals.
    ///
    /// Only [`DayStatus::NotApplicable`] is excluded.
    pub fn is_countable(&self) -> bool {
        *self != DayStatus::NotApplicable
    }

    /// Returns true for the statuses that flag a day for compliance review.
    pub fn is_infraction(&self) -> bool {
        matches!(self, DayStatus::Absence | DayStatus::LateMajor)
    }
}

/// The reconciliation outcome for one employee-day.
///
/// Built fresh each run; never read back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The calendar date the record describes.
    pub date: NaiveDate,
    /// The punch accepted as the clock-in, if any.
    pub matched_in: Option<NaiveDateTime>,
    /// The punch accepted as the clock-out, if any.
    pub matched_out: Option<NaiveDateTime>,
    /// The classification assigned to the day.
    pub status: DayStatus,
    /// Free-text annotation (holiday alias or leave symbol).
    pub observation: Option<String>,
}
