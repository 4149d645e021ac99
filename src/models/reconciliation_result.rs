//! Reconciliation result models.
//!
//! This module contains the envelope types produced by the pipeline: the
//! per-period [`ReconciliationRun`], the per-employee [`AnnualReview`] and
//! the compliance [`InfractionReport`].

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DayRecord, Period, PeriodSummary};

/// The reconciled attendance of one employee over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAttendance {
    /// The employee's unique identifier.
    pub employee_id: String,
    /// The badge code punched at the clock device.
    pub employee_code: String,
    /// Display name for reports.
    pub full_name: String,
    /// One record per date in the period, ascending.
    pub records: Vec<DayRecord>,
    /// Aggregated counts over `records`.
    pub summary: PeriodSummary,
}

/// An employee the batch skipped because of a data problem.
///
/// Skips isolate bad data to the employee it belongs to; the rest of the
/// batch still completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEmployee {
    /// The requested employee id.
    pub employee_id: String,
    /// Why the employee was skipped.
    pub reason: String,
}

/// The complete result of one reconciliation run.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Period, ReconciliationRun};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let run = ReconciliationRun {
///     run_id: Uuid::new_v4(),
///     generated_at: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     period: Period::month(2025, 3).unwrap(),
///     employees: vec![],
///     skipped: vec![],
/// };
/// assert!(run.employees.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationRun {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// The period the run covers.
    pub period: Period,
    /// Per-employee reconciled attendance, in request order.
    pub employees: Vec<EmployeeAttendance>,
    /// Employees skipped because of per-employee data problems.
    pub skipped: Vec<SkippedEmployee>,
}

/// A whole-year attendance review for one employee.
///
/// Backs the annual attendance card: twelve calendar months of the same
/// per-day classification, reduced to the flagged dates of each month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualReview {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the review was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that generated the review.
    pub engine_version: String,
    /// The reviewed employee.
    pub employee_id: String,
    /// The reviewed calendar year.
    pub year: i32,
    /// Flagged dates per calendar month; every month 1-12 has an entry.
    pub bad_days_by_month: BTreeMap<u32, Vec<NaiveDate>>,
    /// Aggregated counts over the whole year.
    pub summary: PeriodSummary,
}

/// One employee over the configured infraction limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Infraction {
    /// The employee's unique identifier.
    pub employee_id: String,
    /// The badge code punched at the clock device.
    pub employee_code: String,
    /// Display name for reports.
    pub full_name: String,
    /// Absences plus major latenesses in the period.
    pub infraction_count: u32,
    /// The flagged dates, ascending.
    pub bad_days: Vec<NaiveDate>,
}

/// The employees whose flagged days reached the configured limit.
///
/// Consumed by the alerting collaborator that notifies supervisors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfractionReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that generated the report.
    pub engine_version: String,
    /// The period the report covers.
    pub period: Period,
    /// The limit an employee must reach to appear in the report.
    pub limit: u32,
    /// Employees at or over the limit.
    pub infractions: Vec<Infraction>,
}
