//! Batch reconciliation pipeline.
//!
//! Wires the stages together for a whole roster: bulk-fetch the five
//! inputs once, group them per employee, then normalize, match, classify
//! and aggregate each employee independently. A data problem in one
//! employee's inputs skips that employee and never poisons the batch; a
//! failed bulk fetch aborts the whole run instead.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::ReconciliationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AnnualReview, DayStatus, Employee, EmployeeAttendance, Holiday, InfractionReport,
    LeaveInterval, Period, PunchEvent, ReconciliationRun, ScheduleWindow, SkippedEmployee,
};
use crate::reconcile::aggregator::{bad_days_by_month, detect_infractions, summarize};
use crate::reconcile::classifier::{DayContext, classify_day};
use crate::reconcile::matcher::match_punches;
use crate::reconcile::normalizer::normalize_punches;
use crate::reconcile::source::AttendanceSource;

/// Runs reconciliation batches against an [`AttendanceSource`].
///
/// The pipeline borrows its source and configuration, so one instance
/// can serve many runs.
///
/// # Example
///
/// ```
/// use attendance_engine::config::{
///     AlertConfig, ClassifierConfig, EscalationConfig, MatcherConfig, NormalizerConfig,
///     ReconciliationConfig, SeasonalOffsetRule,
/// };
/// use attendance_engine::models::{Employee, Period, ScheduleWindow};
/// use attendance_engine::models::PunchEvent;
/// use attendance_engine::reconcile::{InMemorySource, ReconciliationPipeline};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let config = ReconciliationConfig {
///     normalizer: NormalizerConfig {
///         dedup_window_seconds: 30,
///         seasonal_offset_rule: SeasonalOffsetRule::None,
///     },
///     matcher: MatcherConfig { punch_match_tolerance_minutes: 30 },
///     classifier: ClassifierConfig {
///         checkin_tolerance_minutes: 5,
///         late_minor_ceiling_minutes: 15,
///         late_major_threshold_minutes: 16,
///         escalation: EscalationConfig::default(),
///     },
///     alerts: AlertConfig { infraction_limit: 3 },
/// };
/// let source = InMemorySource::new(
///     vec![Employee {
///         id: "emp_001".to_string(),
///         code: "1042".to_string(),
///         full_name: "Maria Lopez".to_string(),
///         hire_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
///         active: true,
///     }],
///     vec![ScheduleWindow {
///         employee_id: "emp_001".to_string(),
///         date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///         expected_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///         duration_minutes: 540,
///     }],
///     vec![],
///     vec![],
///     vec![PunchEvent {
///         employee_id: "emp_001".to_string(),
///         timestamp: "2025-03-10 08:01:12".to_string(),
///     }, PunchEvent {
///         employee_id: "emp_001".to_string(),
///         timestamp: "2025-03-10 17:03:40".to_string(),
///     }],
/// );
///
/// let pipeline = ReconciliationPipeline::new(&source, &config);
/// let period = Period {
///     start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
/// };
/// let run = pipeline
///     .run(&["emp_001".to_string()], period, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
///     .unwrap();
/// assert_eq!(run.employees[0].summary.on_time, 1);
/// ```
pub struct ReconciliationPipeline<'a, S> {
    source: &'a S,
    config: &'a ReconciliationConfig,
}

/// The five inputs of a run, fetched in bulk up front.
struct FetchedBatch {
    employees: Vec<Employee>,
    schedules: Vec<ScheduleWindow>,
    leaves: Vec<LeaveInterval>,
    holidays: Vec<Holiday>,
    punches: Vec<PunchEvent>,
}

impl<'a, S: AttendanceSource> ReconciliationPipeline<'a, S> {
    /// Creates a pipeline over a source and a validated configuration.
    pub fn new(source: &'a S, config: &'a ReconciliationConfig) -> Self {
        Self { source, config }
    }

    /// Reconciles a batch of employees over one period.
    ///
    /// `today` is the grading cut-off: days on or after it come back as
    /// not applicable. Requested ids are deduplicated and the output
    /// keeps the request order. Employees whose data fails validation
    /// land in `skipped` with the reason; the rest of the batch is
    /// unaffected.
    pub fn run(
        &self,
        employee_ids: &[String],
        period: Period,
        today: NaiveDate,
    ) -> EngineResult<ReconciliationRun> {
        validate_period(&period)?;
        let requested = dedup_preserving_order(employee_ids);
        let batch = self.fetch_batch(&requested, &period)?;

        let roster: HashMap<&str, &Employee> =
            batch.employees.iter().map(|e| (e.id.as_str(), e)).collect();
        let schedules = group_by_employee(&batch.schedules, |s| s.employee_id.as_str());
        let leaves = group_by_employee(&batch.leaves, |l| l.employee_id.as_str());
        let punches = group_by_employee(&batch.punches, |p| p.employee_id.as_str());

        let mut employees = Vec::with_capacity(requested.len());
        let mut skipped = Vec::new();
        for employee_id in &requested {
            let outcome = roster
                .get(employee_id.as_str())
                .copied()
                .ok_or_else(|| EngineError::EmployeeNotFound {
                    employee_id: employee_id.clone(),
                })
                .and_then(|employee| {
                    self.reconcile_employee(
                        employee,
                        &period,
                        today,
                        schedules.get(employee_id.as_str()).map(Vec::as_slice).unwrap_or_default(),
                        leaves.get(employee_id.as_str()).map(Vec::as_slice).unwrap_or_default(),
                        &batch.holidays,
                        punches.get(employee_id.as_str()).map(Vec::as_slice).unwrap_or_default(),
                    )
                });
            match outcome {
                Ok(attendance) => employees.push(attendance),
                Err(e) => {
                    warn!(employee_id = %employee_id, error = %e, "Skipping employee");
                    skipped.push(SkippedEmployee {
                        employee_id: employee_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let run = ReconciliationRun {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            period,
            employees,
            skipped,
        };
        info!(
            run_id = %run.run_id,
            employees = run.employees.len(),
            skipped = run.skipped.len(),
            "Reconciliation batch complete"
        );
        Ok(run)
    }

    /// Builds the whole-year review for one employee.
    ///
    /// Unlike [`run`](Self::run) there is no skip list: any data problem
    /// comes back as an error, because a review with silently missing
    /// months would be worse than no review.
    pub fn run_annual(
        &self,
        employee_id: &str,
        year: i32,
        today: NaiveDate,
    ) -> EngineResult<AnnualReview> {
        let period = Period::year(year).ok_or_else(|| EngineError::InvalidPeriod {
            message: format!("{} is not a representable year", year),
        })?;
        let requested = vec![employee_id.to_string()];
        let batch = self.fetch_batch(&requested, &period)?;

        let employee = batch
            .employees
            .iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })?;
        let schedules: Vec<&ScheduleWindow> =
            batch.schedules.iter().filter(|s| s.employee_id == employee_id).collect();
        let leaves: Vec<&LeaveInterval> =
            batch.leaves.iter().filter(|l| l.employee_id == employee_id).collect();
        let punches: Vec<&PunchEvent> =
            batch.punches.iter().filter(|p| p.employee_id == employee_id).collect();

        let attendance = self.reconcile_employee(
            employee,
            &period,
            today,
            &schedules,
            &leaves,
            &batch.holidays,
            &punches,
        )?;

        let review = AnnualReview {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id: employee_id.to_string(),
            year,
            bad_days_by_month: bad_days_by_month(&attendance.records),
            summary: attendance.summary,
        };
        info!(run_id = %review.run_id, employee_id, year, "Annual review complete");
        Ok(review)
    }

    /// Reconciles a batch and reports the employees whose infraction
    /// count reached the configured limit.
    pub fn run_infraction_scan(
        &self,
        employee_ids: &[String],
        period: Period,
        today: NaiveDate,
    ) -> EngineResult<InfractionReport> {
        let run = self.run(employee_ids, period, today)?;
        let limit = self.config.alerts.infraction_limit;
        let infractions = detect_infractions(&run.employees, limit);

        let report = InfractionReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            period,
            limit,
            infractions,
        };
        info!(
            run_id = %report.run_id,
            flagged = report.infractions.len(),
            limit,
            "Infraction scan complete"
        );
        Ok(report)
    }

    fn fetch_batch(&self, employee_ids: &[String], period: &Period) -> EngineResult<FetchedBatch> {
        Ok(FetchedBatch {
            employees: fetch("employees", self.source.fetch_employees(employee_ids))?,
            schedules: fetch("schedules", self.source.fetch_schedules(employee_ids, period))?,
            leaves: fetch("leaves", self.source.fetch_leaves(employee_ids, period))?,
            holidays: fetch("holidays", self.source.fetch_holidays(period))?,
            punches: fetch("punches", self.source.fetch_punches(employee_ids, period))?,
        })
    }

    /// Runs the per-employee stages over every date of the period.
    ///
    /// Validates the employee's schedule windows and leave intervals
    /// first; a violation fails the employee, not the batch.
    fn reconcile_employee(
        &self,
        employee: &Employee,
        period: &Period,
        today: NaiveDate,
        schedules: &[&ScheduleWindow],
        leaves: &[&LeaveInterval],
        holidays: &[Holiday],
        punches: &[&PunchEvent],
    ) -> EngineResult<EmployeeAttendance> {
        let mut window_by_date: HashMap<NaiveDate, &ScheduleWindow> =
            HashMap::with_capacity(schedules.len());
        for window in schedules {
            if window.duration_minutes <= 0 {
                return Err(EngineError::InvalidSchedule {
                    employee_id: employee.id.clone(),
                    date: window.date,
                    message: format!("duration must be positive, got {}", window.duration_minutes),
                });
            }
            if window_by_date.insert(window.date, *window).is_some() {
                return Err(EngineError::InvalidSchedule {
                    employee_id: employee.id.clone(),
                    date: window.date,
                    message: "more than one window for the date".to_string(),
                });
            }
        }

        let mut valid_leaves: Vec<LeaveInterval> = Vec::with_capacity(leaves.len());
        for leave in leaves {
            if leave.end < leave.start {
                return Err(EngineError::InvalidLeave {
                    employee_id: employee.id.clone(),
                    message: format!(
                        "interval ends before it starts ({} > {})",
                        leave.start, leave.end
                    ),
                });
            }
            valid_leaves.push((*leave).clone());
        }

        let raw_timestamps: Vec<&str> = punches.iter().map(|p| p.timestamp.as_str()).collect();
        let punch_days = normalize_punches(&employee.id, &raw_timestamps, &self.config.normalizer);

        let mut records = Vec::new();
        let mut minor_count = 0u32;
        for date in period.days() {
            let day_punches = punch_days.get(&date).map(Vec::as_slice).unwrap_or_default();
            let window = window_by_date.get(&date).copied();
            let matched = match_punches(day_punches, window, &self.config.matcher);
            if matched.multi_punch {
                debug!(employee_id = %employee.id, %date, "Multiple punch clusters on one day");
            }
            let ctx = DayContext {
                date,
                today,
                hire_date: employee.hire_date,
                window,
                matched,
                leaves: &valid_leaves,
                holidays,
                prior_minor_count: minor_count,
            };
            let record = classify_day(&ctx, &self.config.classifier);
            debug!(employee_id = %employee.id, %date, status = ?record.status, "Day classified");
            if record.status == DayStatus::LateMinor {
                minor_count += 1;
            }
            records.push(record);
        }

        let summary = summarize(&records);
        debug!(
            employee_id = %employee.id,
            records = records.len(),
            bad_days = summary.bad_days.len(),
            "Employee reconciled"
        );
        Ok(EmployeeAttendance {
            employee_id: employee.id.clone(),
            employee_code: employee.code.clone(),
            full_name: employee.full_name.clone(),
            records,
            summary,
        })
    }
}

fn validate_period(period: &Period) -> EngineResult<()> {
    if period.start_date > period.end_date {
        return Err(EngineError::InvalidPeriod {
            message: format!(
                "start date {} is after end date {}",
                period.start_date, period.end_date
            ),
        });
    }
    Ok(())
}

fn fetch<T>(what: &str, result: EngineResult<Vec<T>>) -> EngineResult<Vec<T>> {
    result.map_err(|e| {
        error!(source = what, error = %e, "Bulk fetch failed; aborting batch");
        e
    })
}

fn dedup_preserving_order(employee_ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    employee_ids.iter().filter(|id| seen.insert(id.as_str())).cloned().collect()
}

fn group_by_employee<'b, T>(
    items: &'b [T],
    key: impl Fn(&T) -> &str,
) -> HashMap<&'b str, Vec<&'b T>> {
    let mut grouped: HashMap<&str, Vec<&T>> = HashMap::new();
    for item in items {
        grouped.entry(key(item)).or_default().push(item);
    }
    grouped
}
