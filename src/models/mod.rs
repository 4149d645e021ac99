//! Core data models for the Attendance Reconciliation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod day_record;
mod employee;
mod leave;
mod period;
mod punch;
mod reconciliation_result;
mod schedule;
mod summary;

pub use day_record::{DayRecord, DayStatus};
pub use employee::Employee;
pub use leave::LeaveInterval;
pub use period::{Holiday, MonthHalf, Period};
pub use punch::PunchEvent;
pub use reconciliation_result::{
    AnnualReview, EmployeeAttendance, Infraction, InfractionReport, ReconciliationRun,
    SkippedEmployee,
};
pub use schedule::ScheduleWindow;
pub use summary::PeriodSummary;
