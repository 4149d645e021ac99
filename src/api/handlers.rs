//! HTTP request handlers for the Attendance Reconciliation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::Period;
use crate::reconcile::{InMemorySource, ReconciliationPipeline};

use super::request::{AnnualReviewRequest, AttendanceDataRequest, ReconcileRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reconcile", post(reconcile_handler))
        .route("/reconcile/annual", post(annual_review_handler))
        .route("/reconcile/infractions", post(infraction_scan_handler))
        .with_state(state)
}

/// Handler for the POST /reconcile endpoint.
///
/// Accepts a period plus an attendance data snapshot and returns the
/// reconciled run for the requested employees.
async fn reconcile_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReconcileRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reconciliation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let period: Period = request.period.into();
    let today = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let employee_ids = resolve_employee_ids(request.employee_ids, &request.data);
    let source: InMemorySource = request.data.into();

    let start_time = Instant::now();
    let pipeline = ReconciliationPipeline::new(&source, state.config().config());
    match pipeline.run(&employee_ids, period, today) {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run.run_id,
                employees = run.employees.len(),
                skipped = run.skipped.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Reconciliation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(run),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Reconciliation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for the POST /reconcile/annual endpoint.
///
/// Reconciles a whole calendar year for one employee and returns the
/// per-month flagged dates.
async fn annual_review_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnnualReviewRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing annual review request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let today = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let source: InMemorySource = request.data.into();

    let start_time = Instant::now();
    let pipeline = ReconciliationPipeline::new(&source, state.config().config());
    match pipeline.run_annual(&request.employee_id, request.year, today) {
        Ok(review) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %review.run_id,
                employee_id = %review.employee_id,
                year = review.year,
                duration_us = start_time.elapsed().as_micros(),
                "Annual review completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(review),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Annual review failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for the POST /reconcile/infractions endpoint.
///
/// Reconciles the batch, then reports only the employees whose
/// infraction count reached the configured limit.
async fn infraction_scan_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReconcileRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing infraction scan request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let period: Period = request.period.into();
    let today = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let employee_ids = resolve_employee_ids(request.employee_ids, &request.data);
    let source: InMemorySource = request.data.into();

    let start_time = Instant::now();
    let pipeline = ReconciliationPipeline::new(&source, state.config().config());
    match pipeline.run_infraction_scan(&employee_ids, period, today) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %report.run_id,
                flagged = report.infractions.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Infraction scan completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Infraction scan failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Falls back to every employee in the snapshot when the request does
/// not name specific ids, keeping the snapshot order.
fn resolve_employee_ids(
    requested: Option<Vec<String>>,
    data: &AttendanceDataRequest,
) -> Vec<String> {
    match requested {
        Some(ids) => ids,
        None => data.employees.iter().map(|e| e.id.clone()).collect(),
    }
}

/// Converts a JSON extraction failure into a 400 response.
fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Check if it's a missing field error
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
