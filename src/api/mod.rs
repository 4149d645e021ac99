//! HTTP API module for the Attendance Reconciliation Engine.
//!
//! This module provides the REST API endpoints for reconciling punch
//! data against schedules and reporting attendance infractions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AnnualReviewRequest, AttendanceDataRequest, ReconcileRequest};
pub use response::ApiError;
pub use state::AppState;
