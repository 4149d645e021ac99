//! Error types for the Attendance Reconciliation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during reconciliation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Reconciliation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation at load time.
    ///
    /// The engine refuses to start a batch with ambiguous rules, so this
    /// error is fatal.
    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation {
        /// The configuration field that failed validation.
        field: String,
        /// A description of why the value is invalid.
        message: String,
    },

    /// A requested period has its start date after its end date.
    #[error("Invalid period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// A requested employee id was not present in the fetched roster.
    #[error("Employee not found in roster: {employee_id}")]
    EmployeeNotFound {
        /// The id that was requested but not fetched.
        employee_id: String,
    },

    /// A schedule window contained inconsistent data for an employee-day.
    #[error("Invalid schedule for employee '{employee_id}' on {date}: {message}")]
    InvalidSchedule {
        /// The employee the schedule belongs to.
        employee_id: String,
        /// The date of the offending window.
        date: NaiveDate,
        /// A description of what made the window invalid.
        message: String,
    },

    /// A leave interval contained inconsistent data for an employee.
    #[error("Invalid leave interval for employee '{employee_id}': {message}")]
    InvalidLeave {
        /// The employee the interval belongs to.
        employee_id: String,
        /// A description of what made the interval invalid.
        message: String,
    },

    /// A bulk data source could not be fetched at all.
    ///
    /// A whole-source failure aborts the batch; per-employee data problems
    /// are isolated by the pipeline instead.
    #[error("Data source '{source}' unavailable: {message}")]
    SourceUnavailable {
        /// The name of the data source that failed.
        source: String,
        /// A description of the fetch failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_config_validation_displays_field_and_message() {
        let error = EngineError::ConfigValidation {
            field: "dedup_window_seconds".to_string(),
            message: "must be at least 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for 'dedup_window_seconds': must be at least 1"
        );
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            employee_id: "emp_404".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found in roster: emp_404");
    }

    #[test]
    fn test_invalid_schedule_displays_employee_and_date() {
        let error = EngineError::InvalidSchedule {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            message: "duration must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid schedule for employee 'emp_001' on 2025-03-10: duration must be positive"
        );
    }

    #[test]
    fn test_source_unavailable_displays_source() {
        let error = EngineError::SourceUnavailable {
            source: "punches".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Data source 'punches' unavailable: connection refused"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_period() -> EngineResult<()> {
            Err(EngineError::InvalidPeriod {
                message: "start after end".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_period()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
