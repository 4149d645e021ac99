//! Authorized leave model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An authorized leave interval for one employee.
///
/// Both endpoints are inclusive. Coverage is evaluated at day granularity:
/// the interval covers every calendar date from `start.date()` through
/// `end.date()` regardless of the times of day.
///
/// # Example
///
/// ```
/// use attendance_engine::models::LeaveInterval;
/// use chrono::NaiveDate;
///
/// let leave = LeaveInterval {
///     employee_id: "emp_001".to_string(),
///     start: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(0, 0, 0).unwrap(),
///     end: NaiveDate::from_ymd_opt(2025, 3, 12).unwrap().and_hms_opt(23, 59, 59).unwrap(),
///     symbol: "VAC".to_string(),
///     category: "vacation".to_string(),
/// };
///
/// assert!(leave.covers(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap()));
/// assert!(!leave.covers(NaiveDate::from_ymd_opt(2025, 3, 13).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveInterval {
    /// The employee the leave belongs to.
    pub employee_id: String,
    /// First covered instant (inclusive).
    pub start: NaiveDateTime,
    /// Last covered instant (inclusive).
    pub end: NaiveDateTime,
    /// Short code recorded on attendance cards (e.g. "VAC").
    pub symbol: String,
    /// The leave category the symbol belongs to (e.g. "vacation").
    pub category: String,
}

impl LeaveInterval {
    /// Returns true when the interval covers the given calendar date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }
}
