//! Configuration loading and management for the Attendance Reconciliation Engine.
//!
//! This module provides functionality to load the reconciliation thresholds
//! from YAML files, covering punch cleanup, matching, lateness grading and
//! compliance alerting.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!(
//!     "Dedup window: {} seconds",
//!     config.normalizer().dedup_window_seconds
//! );
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AlertConfig, ClassifierConfig, EscalationConfig, MatcherConfig, NormalizerConfig,
    ReconciliationConfig, SeasonalOffsetRule,
};
