//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! reconciliation configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AlertConfig, ClassifierConfig, MatcherConfig, NormalizerConfig, ReconciliationConfig,
};

/// Loads and provides access to the reconciliation configuration.
///
/// The `ConfigLoader` reads the YAML configuration file from a directory,
/// validates it and provides section accessors for the engine components.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── reconciliation.yaml   # normalizer, matcher, classifier, alerts
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!(
///     "Check-in tolerance: {} minutes",
///     loader.classifier().checkin_tolerance_minutes
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ReconciliationConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The configuration file is missing
    /// - The file contains invalid YAML or a missing field
    /// - Any cross-field validation fails (e.g. mismatched lateness bands)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let config_path = path.join("reconciliation.yaml");
        let config = Self::load_yaml::<ReconciliationConfig>(&config_path)?;
        config.validate()?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the complete reconciliation configuration.
    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Returns the punch cleanup settings.
    pub fn normalizer(&self) -> &NormalizerConfig {
        &self.config.normalizer
    }

    /// Returns the punch-to-window matching settings.
    pub fn matcher(&self) -> &MatcherConfig {
        &self.config.matcher
    }

    /// Returns the lateness grading settings.
    pub fn classifier(&self) -> &ClassifierConfig {
        &self.config.classifier
    }

    /// Returns the compliance alerting settings.
    pub fn alerts(&self) -> &AlertConfig {
        &self.config.alerts
    }
}
