//! Expected work schedule model.
//!
//! This module defines the [`ScheduleWindow`] struct describing when an
//! employee is expected to be present on a given date.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The expected work window for one employee on one date.
///
/// At most one window exists per employee-date; a day without a window
/// carries no expectation of presence. The window is defined by a start
/// time and a duration so shifts crossing midnight stay well formed.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ScheduleWindow;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let window = ScheduleWindow {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     expected_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     duration_minutes: 540,
/// };
///
/// assert_eq!(window.target_out() - window.target_in(), chrono::Duration::minutes(540));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    /// The employee this window belongs to.
    pub employee_id: String,
    /// The calendar date the window starts on.
    pub date: NaiveDate,
    /// The expected clock-in time of day.
    pub expected_in: NaiveTime,
    /// The expected presence in minutes, measured from `expected_in`.
    pub duration_minutes: i64,
}

impl ScheduleWindow {
    /// The expected clock-in instant.
    pub fn target_in(&self) -> NaiveDateTime {
        self.date.and_time(self.expected_in)
    }

    /// The expected clock-out instant.
    ///
    /// For windows crossing midnight this lands on the following date.
    pub fn target_out(&self) -> NaiveDateTime {
        self.target_in() + Duration::minutes(self.duration_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_window(hour: u32, duration_minutes: i64) -> ScheduleWindow {
        ScheduleWindow {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            expected_in: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            duration_minutes,
        }
    }

    #[test]
    fn test_target_in_combines_date_and_time() {
        let window = create_test_window(8, 540);
        assert_eq!(
            window.target_in(),
            NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_target_out_adds_duration() {
        let window = create_test_window(8, 540);
        assert_eq!(
            window.target_out(),
            NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(17, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_target_out_crosses_midnight() {
        let window = create_test_window(22, 480);
        assert_eq!(
            window.target_out(),
            NaiveDate::from_ymd_opt(2025, 3, 11)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_deserialize_schedule_window() {
        let json = r#"{
            "employee_id": "emp_001",
            "date": "2025-03-10",
            "expected_in": "08:00:00",
            "duration_minutes": 540
        }"#;

        let window: ScheduleWindow = serde_json::from_str(json).unwrap();
        assert_eq!(window.employee_id, "emp_001");
        assert_eq!(window.date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(window.expected_in, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(window.duration_minutes, 540);
    }

    #[test]
    fn test_serialize_schedule_window_round_trip() {
        let window = create_test_window(9, 480);
        let json = serde_json::to_string(&window).unwrap();
        let deserialized: ScheduleWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(window, deserialized);
    }
}
