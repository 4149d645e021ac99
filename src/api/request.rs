//! Request types for the Attendance Reconciliation Engine API.
//!
//! This module defines the JSON request structures for the `/reconcile`
//! endpoints. Each request carries its own attendance data, so callers
//! hand the engine a self-contained snapshot to reconcile.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{Employee, Holiday, LeaveInterval, Period, PunchEvent, ScheduleWindow};
use crate::reconcile::InMemorySource;

/// Request body for the `/reconcile` and `/reconcile/infractions` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// The period to reconcile.
    pub period: PeriodRequest,
    /// The grading cut-off date; defaults to the current UTC date.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The employees to reconcile; defaults to every employee in `data`.
    #[serde(default)]
    pub employee_ids: Option<Vec<String>>,
    /// The attendance data snapshot to reconcile against.
    pub data: AttendanceDataRequest,
}

/// Request body for the `/reconcile/annual` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualReviewRequest {
    /// The employee to review.
    pub employee_id: String,
    /// The calendar year to review.
    pub year: i32,
    /// The grading cut-off date; defaults to the current UTC date.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The attendance data snapshot to reconcile against.
    pub data: AttendanceDataRequest,
}

/// Period information in a reconciliation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

/// The attendance data snapshot carried by a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceDataRequest {
    /// Roster entries.
    pub employees: Vec<EmployeeRequest>,
    /// Expected schedule windows.
    #[serde(default)]
    pub schedules: Vec<ScheduleWindowRequest>,
    /// Approved leave intervals.
    #[serde(default)]
    pub leaves: Vec<LeaveIntervalRequest>,
    /// Company holidays.
    #[serde(default)]
    pub holidays: Vec<HolidayRequest>,
    /// Raw punch events from the clock devices.
    #[serde(default)]
    pub punches: Vec<PunchEventRequest>,
}

/// Employee information in a reconciliation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// The badge code punched at the clock device.
    pub code: String,
    /// Display name for reports.
    pub full_name: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// Whether the employee is currently active.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Schedule window information in a reconciliation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleWindowRequest {
    /// The employee the window belongs to.
    pub employee_id: String,
    /// The date the window starts on.
    pub date: NaiveDate,
    /// The expected check-in time.
    pub expected_in: NaiveTime,
    /// The scheduled length of the working day in minutes.
    pub duration_minutes: i64,
}

/// Leave interval information in a reconciliation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveIntervalRequest {
    /// The employee the leave belongs to.
    pub employee_id: String,
    /// When the leave starts.
    pub start: NaiveDateTime,
    /// When the leave ends.
    pub end: NaiveDateTime,
    /// The short code recorded on covered days (e.g. "SL").
    pub symbol: String,
    /// The leave category.
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "general".to_string()
}

/// Holiday information in a reconciliation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRequest {
    /// First day of the holiday (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the holiday (inclusive).
    pub end_date: NaiveDate,
    /// The label recorded on covered days.
    pub alias: String,
}

/// Punch event information in a reconciliation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchEventRequest {
    /// The employee whose badge produced the punch.
    pub employee_id: String,
    /// The raw device timestamp, kept verbatim.
    pub timestamp: String,
}

impl From<PeriodRequest> for Period {
    fn from(req: PeriodRequest) -> Self {
        Period {
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            code: req.code,
            full_name: req.full_name,
            hire_date: req.hire_date,
            active: req.active,
        }
    }
}

impl From<ScheduleWindowRequest> for ScheduleWindow {
    fn from(req: ScheduleWindowRequest) -> Self {
        ScheduleWindow {
            employee_id: req.employee_id,
            date: req.date,
            expected_in: req.expected_in,
            duration_minutes: req.duration_minutes,
        }
    }
}

impl From<LeaveIntervalRequest> for LeaveInterval {
    fn from(req: LeaveIntervalRequest) -> Self {
        LeaveInterval {
            employee_id: req.employee_id,
            start: req.start,
            end: req.end,
            symbol: req.symbol,
            category: req.category,
        }
    }
}

impl From<HolidayRequest> for Holiday {
    fn from(req: HolidayRequest) -> Self {
        Holiday {
            start_date: req.start_date,
            end_date: req.end_date,
            alias: req.alias,
        }
    }
}

impl From<PunchEventRequest> for PunchEvent {
    fn from(req: PunchEventRequest) -> Self {
        PunchEvent {
            employee_id: req.employee_id,
            timestamp: req.timestamp,
        }
    }
}

impl From<AttendanceDataRequest> for InMemorySource {
    fn from(data: AttendanceDataRequest) -> Self {
        InMemorySource::new(
            data.employees.into_iter().map(Into::into).collect(),
            data.schedules.into_iter().map(Into::into).collect(),
            data.leaves.into_iter().map(Into::into).collect(),
            data.holidays.into_iter().map(Into::into).collect(),
            data.punches.into_iter().map(Into::into).collect(),
        )
    }
}
