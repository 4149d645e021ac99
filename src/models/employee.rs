//! Employee roster model.
//!
//! This module defines the Employee struct representing workers fetched
//! from the personnel roster.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An employee as fetched from the personnel roster.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::Employee;
/// use chrono::NaiveDate;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     code: "1042".to_string(),
///     full_name: "Maria Lopez".to_string(),
///     hire_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
///     active: true,
/// };
/// assert!(employee.hired_by(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The badge code punched at the clock device.
    pub code: String,
    /// Display name for reports.
    pub full_name: String,
    /// The hire date; days before it are never evaluated.
    pub hire_date: NaiveDate,
    /// Whether the employee is currently on the active roster.
    pub active: bool,
}

impl Employee {
    /// Returns true when the employee was already hired on the given date.
    pub fn hired_by(&self, date: NaiveDate) -> bool {
        self.hire_date <= date
    }
}
