//! Attendance data sources.
//!
//! The pipeline pulls everything it needs through [`AttendanceSource`],
//! so the reconciliation logic never knows whether the data came from a
//! request payload, a file drop, or a device gateway. [`InMemorySource`]
//! is the implementation used by the API and the tests.

use crate::error::EngineResult;
use crate::models::{Employee, Holiday, LeaveInterval, Period, PunchEvent, ScheduleWindow};

/// Bulk access to the five inputs of a reconciliation run.
///
/// Implementations may return a superset of what was asked for; the
/// pipeline groups by employee and trims by date itself. A backend that
/// cannot answer should report [`EngineError::SourceUnavailable`] so the
/// whole batch aborts instead of silently reconciling against partial
/// data.
///
/// [`EngineError::SourceUnavailable`]: crate::error::EngineError::SourceUnavailable
pub trait AttendanceSource {
    /// Fetches roster entries for the requested employees.
    fn fetch_employees(&self, employee_ids: &[String]) -> EngineResult<Vec<Employee>>;

    /// Fetches schedule windows for the requested employees within the period.
    fn fetch_schedules(
        &self,
        employee_ids: &[String],
        period: &Period,
    ) -> EngineResult<Vec<ScheduleWindow>>;

    /// Fetches leave intervals overlapping the period for the requested employees.
    fn fetch_leaves(
        &self,
        employee_ids: &[String],
        period: &Period,
    ) -> EngineResult<Vec<LeaveInterval>>;

    /// Fetches holidays overlapping the period.
    fn fetch_holidays(&self, period: &Period) -> EngineResult<Vec<Holiday>>;

    /// Fetches raw punch events for the requested employees.
    ///
    /// Punch timestamps are still raw device strings at this point, so
    /// implementations filter by employee only and leave date trimming
    /// to the pipeline, which does it after normalization.
    fn fetch_punches(
        &self,
        employee_ids: &[String],
        period: &Period,
    ) -> EngineResult<Vec<PunchEvent>>;
}

/// An [`AttendanceSource`] over data already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    employees: Vec<Employee>,
    schedules: Vec<ScheduleWindow>,
    leaves: Vec<LeaveInterval>,
    holidays: Vec<Holiday>,
    punches: Vec<PunchEvent>,
}

impl InMemorySource {
    /// Creates a source over the given data.
    pub fn new(
        employees: Vec<Employee>,
        schedules: Vec<ScheduleWindow>,
        leaves: Vec<LeaveInterval>,
        holidays: Vec<Holiday>,
        punches: Vec<PunchEvent>,
    ) -> Self {
        Self {
            employees,
            schedules,
            leaves,
            holidays,
            punches,
        }
    }
}

impl AttendanceSource for InMemorySource {
    fn fetch_employees(&self, employee_ids: &[String]) -> EngineResult<Vec<Employee>> {
        Ok(self
            .employees
            .iter()
            .filter(|e| employee_ids.contains(&e.id))
            .cloned()
            .collect())
    }

    fn fetch_schedules(
        &self,
        employee_ids: &[String],
        period: &Period,
    ) -> EngineResult<Vec<ScheduleWindow>> {
        Ok(self
            .schedules
            .iter()
            .filter(|s| employee_ids.contains(&s.employee_id) && period.contains(s.date))
            .cloned()
            .collect())
    }

    fn fetch_leaves(
        &self,
        employee_ids: &[String],
        period: &Period,
    ) -> EngineResult<Vec<LeaveInterval>> {
        Ok(self
            .leaves
            .iter()
            .filter(|l| {
                employee_ids.contains(&l.employee_id)
                    && l.start.date() <= period.end_date
                    && l.end.date() >= period.start_date
            })
            .cloned()
            .collect())
    }

    fn fetch_holidays(&self, period: &Period) -> EngineResult<Vec<Holiday>> {
        Ok(self
            .holidays
            .iter()
            .filter(|h| h.start_date <= period.end_date && h.end_date >= period.start_date)
            .cloned()
            .collect())
    }

    fn fetch_punches(
        &self,
        employee_ids: &[String],
        _period: &Period,
    ) -> EngineResult<Vec<PunchEvent>> {
        Ok(self
            .punches
            .iter()
            .filter(|p| employee_ids.contains(&p.employee_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            code: format!("code_{}", id),
            full_name: format!("Employee {}", id),
            hire_date: make_date("2020-01-01"),
            active: true,
        }
    }

    fn march() -> Period {
        Period::month(2025, 3).unwrap()
    }

    #[test]
    fn test_fetch_employees_filters_by_id() {
        let source = InMemorySource::new(
            vec![make_employee("emp_001"), make_employee("emp_002")],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );

        let employees = source.fetch_employees(&["emp_002".to_string()]).unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].id, "emp_002");
    }

    #[test]
    fn test_fetch_schedules_trims_by_period() {
        let window = |date_str: &str| ScheduleWindow {
            employee_id: "emp_001".to_string(),
            date: make_date(date_str),
            expected_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            duration_minutes: 540,
        };
        let source = InMemorySource::new(
            Vec::new(),
            vec![window("2025-02-28"), window("2025-03-10"), window("2025-04-01")],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );

        let schedules = source
            .fetch_schedules(&["emp_001".to_string()], &march())
            .unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].date, make_date("2025-03-10"));
    }

    #[test]
    fn test_fetch_leaves_keeps_overlapping_intervals() {
        let leave = |start: &str, end: &str| LeaveInterval {
            employee_id: "emp_001".to_string(),
            start: make_date(start).and_hms_opt(0, 0, 0).unwrap(),
            end: make_date(end).and_hms_opt(23, 59, 59).unwrap(),
            symbol: "AL".to_string(),
            category: "annual".to_string(),
        };
        let source = InMemorySource::new(
            Vec::new(),
            Vec::new(),
            vec![
                // Straddles the period start.
                leave("2025-02-25", "2025-03-02"),
                // Entirely before.
                leave("2025-01-05", "2025-01-10"),
            ],
            Vec::new(),
            Vec::new(),
        );

        let leaves = source
            .fetch_leaves(&["emp_001".to_string()], &march())
            .unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].start.date(), make_date("2025-02-25"));
    }

    #[test]
    fn test_fetch_holidays_ignores_employee_scope() {
        let source = InMemorySource::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![
                Holiday {
                    start_date: make_date("2025-03-10"),
                    end_date: make_date("2025-03-11"),
                    alias: "Carnival".to_string(),
                },
                Holiday {
                    start_date: make_date("2025-05-01"),
                    end_date: make_date("2025-05-01"),
                    alias: "Labour Day".to_string(),
                },
            ],
            Vec::new(),
        );

        let holidays = source.fetch_holidays(&march()).unwrap();
        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].alias, "Carnival");
    }

    #[test]
    fn test_fetch_punches_returns_raw_strings_per_employee() {
        let source = InMemorySource::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![
                PunchEvent {
                    employee_id: "emp_001".to_string(),
                    timestamp: "2025-03-10 08:01:00".to_string(),
                },
                PunchEvent {
                    employee_id: "emp_002".to_string(),
                    timestamp: "2025-03-10 08:02:00".to_string(),
                },
            ],
        );

        let punches = source
            .fetch_punches(&["emp_001".to_string()], &march())
            .unwrap();
        assert_eq!(punches.len(), 1);
        assert_eq!(punches[0].timestamp, "2025-03-10 08:01:00");
    }
}
