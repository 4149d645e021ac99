//! Raw punch event model.
//!
//! A punch event is one row exported from a biometric clock device. The
//! timestamp stays a raw string here; parsing and cleanup happen in the
//! normalizer.

use serde::{Deserialize, Serialize};

/// A single raw clock punch as exported by a biometric device.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PunchEvent;
///
/// let punch = PunchEvent {
///     employee_id: "emp_001".to_string(),
///     timestamp: "2025-03-10 08:02:17".to_string(),
/// };
/// assert_eq!(punch.employee_id, "emp_001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// The employee the punch belongs to.
    pub employee_id: String,
    /// The raw device timestamp, normally `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
}
