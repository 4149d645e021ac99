//! Attendance Reconciliation & Classification Engine
//!
//! This crate reconciles raw biometric clock punches against expected work
//! schedules, assigns exactly one classification to every employee-day
//! (on time, late, absent, justified, rest, missing punch) and rolls the
//! daily results into half-month, month and annual summaries used for
//! payroll review and compliance alerts.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
