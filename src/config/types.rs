//! Configuration types for attendance reconciliation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// The seasonal clock adjustment applied to raw punch timestamps.
///
/// Legacy clock firmware never tracked daylight saving, so deployments
/// corrected timestamps after the fact. Two correction policies exist in
/// the field and both stay selectable; the rule is mandatory in the
/// configuration file so a deployment states which one it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalOffsetRule {
    /// +1 hour April through October, -1 hour the rest of the year.
    SummerForwardWinterBack,
    /// +1 hour April through October, untouched the rest of the year.
    SummerForwardOnly,
    /// No adjustment.
    None,
}

/// Punch cleanup settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerConfig {
    /// Seconds within which a punch collapses into the previously kept one.
    pub dedup_window_seconds: i64,
    /// The seasonal clock adjustment policy.
    pub seasonal_offset_rule: SeasonalOffsetRule,
}

/// Punch-to-window matching settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    /// Maximum distance in minutes between a punch and its slot target
    /// for the punch to be accepted.
    pub punch_match_tolerance_minutes: i64,
}

/// Escalation of repeated minor lateness within a run.
#[derive(Debug, Clone, Deserialize)]
pub struct EscalationConfig {
    /// Whether repeated minor lateness escalates to major at all.
    pub enabled: bool,
    /// Prior minor-late days an employee must have accumulated in the run
    /// before a further minor-late day is graded major.
    pub minor_repeat_limit: u32,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            minor_repeat_limit: 3,
        }
    }
}

/// Lateness grading settings.
///
/// The minor/major boundary is stated from both sides:
/// `late_minor_ceiling_minutes` is the last minute still graded minor and
/// `late_major_threshold_minutes` is the first minute graded major. The
/// two must be adjacent; [`ReconciliationConfig::validate`] rejects any
/// gap or overlap between the bands.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Minutes after the expected clock-in still counted as on time.
    pub checkin_tolerance_minutes: i64,
    /// Last minute of lateness graded as minor.
    pub late_minor_ceiling_minutes: i64,
    /// First minute of lateness graded as major.
    pub late_major_threshold_minutes: i64,
    /// Escalation of repeated minor lateness; disabled when omitted.
    #[serde(default)]
    pub escalation: EscalationConfig,
}

/// Compliance alerting settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    /// Flagged days an employee must reach in a period to be reported.
    pub infraction_limit: u32,
}

/// The complete reconciliation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationConfig {
    /// Punch cleanup settings.
    pub normalizer: NormalizerConfig,
    /// Punch-to-window matching settings.
    pub matcher: MatcherConfig,
    /// Lateness grading settings.
    pub classifier: ClassifierConfig,
    /// Compliance alerting settings.
    pub alerts: AlertConfig,
}

impl ReconciliationConfig {
    /// Validates cross-field constraints.
    ///
    /// Called at load time; a batch never starts on a configuration that
    /// fails here.
    pub fn validate(&self) -> EngineResult<()> {
        if self.normalizer.dedup_window_seconds < 1 {
            return Err(EngineError::ConfigValidation {
                field: "dedup_window_seconds".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.matcher.punch_match_tolerance_minutes < 1 {
            return Err(EngineError::ConfigValidation {
                field: "punch_match_tolerance_minutes".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.classifier.checkin_tolerance_minutes < 0 {
            return Err(EngineError::ConfigValidation {
                field: "checkin_tolerance_minutes".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.classifier.late_minor_ceiling_minutes < self.classifier.checkin_tolerance_minutes {
            return Err(EngineError::ConfigValidation {
                field: "late_minor_ceiling_minutes".to_string(),
                message: format!(
                    "must be at least checkin_tolerance_minutes ({})",
                    self.classifier.checkin_tolerance_minutes
                ),
            });
        }
        if self.classifier.late_major_threshold_minutes
            != self.classifier.late_minor_ceiling_minutes + 1
        {
            return Err(EngineError::ConfigValidation {
                field: "late_major_threshold_minutes".to_string(),
                message: format!(
                    "must be exactly late_minor_ceiling_minutes + 1 (expected {}, got {}); \
                     anything else leaves a gap or overlap between the lateness bands",
                    self.classifier.late_minor_ceiling_minutes + 1,
                    self.classifier.late_major_threshold_minutes
                ),
            });
        }
        if self.classifier.escalation.enabled && self.classifier.escalation.minor_repeat_limit < 1 {
            return Err(EngineError::ConfigValidation {
                field: "escalation.minor_repeat_limit".to_string(),
                message: "must be at least 1 when escalation is enabled".to_string(),
            });
        }
        if self.alerts.infraction_limit < 1 {
            return Err(EngineError::ConfigValidation {
                field: "infraction_limit".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_yaml() -> &'static str {
        r#"
normalizer:
  dedup_window_seconds: 30
  seasonal_offset_rule: summer_forward_only
matcher:
  punch_match_tolerance_minutes: 30
classifier:
  checkin_tolerance_minutes: 5
  late_minor_ceiling_minutes: 15
  late_major_threshold_minutes: 16
  escalation:
    enabled: false
    minor_repeat_limit: 3
alerts:
  infraction_limit: 3
"#
    }

    fn parse(yaml: &str) -> ReconciliationConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_valid_config_parses_and_validates() {
        let config = parse(valid_yaml());
        assert!(config.validate().is_ok());
        assert_eq!(config.normalizer.dedup_window_seconds, 30);
        assert_eq!(
            config.normalizer.seasonal_offset_rule,
            SeasonalOffsetRule::SummerForwardOnly
        );
        assert_eq!(config.matcher.punch_match_tolerance_minutes, 30);
        assert_eq!(config.classifier.checkin_tolerance_minutes, 5);
        assert_eq!(config.alerts.infraction_limit, 3);
    }

    #[test]
    fn test_seasonal_offset_rule_is_mandatory() {
        let yaml = r#"
normalizer:
  dedup_window_seconds: 30
matcher:
  punch_match_tolerance_minutes: 30
classifier:
  checkin_tolerance_minutes: 5
  late_minor_ceiling_minutes: 15
  late_major_threshold_minutes: 16
alerts:
  infraction_limit: 3
"#;
        let result: Result<ReconciliationConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_all_seasonal_offset_rules_parse() {
        for (name, rule) in [
            ("summer_forward_winter_back", SeasonalOffsetRule::SummerForwardWinterBack),
            ("summer_forward_only", SeasonalOffsetRule::SummerForwardOnly),
            ("none", SeasonalOffsetRule::None),
        ] {
            let yaml = valid_yaml().replace("summer_forward_only", name);
            assert_eq!(parse(&yaml).normalizer.seasonal_offset_rule, rule);
        }
    }

    #[test]
    fn test_unknown_seasonal_offset_rule_is_rejected() {
        let yaml = valid_yaml().replace("summer_forward_only", "always_forward");
        let result: Result<ReconciliationConfig, _> = serde_yaml::from_str(&yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_escalation_defaults_to_disabled_when_omitted() {
        let yaml = r#"
normalizer:
  dedup_window_seconds: 30
  seasonal_offset_rule: none
matcher:
  punch_match_tolerance_minutes: 30
classifier:
  checkin_tolerance_minutes: 5
  late_minor_ceiling_minutes: 15
  late_major_threshold_minutes: 16
alerts:
  infraction_limit: 3
"#;
        let config = parse(yaml);
        assert!(!config.classifier.escalation.enabled);
        assert_eq!(config.classifier.escalation.minor_repeat_limit, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_band_gap_is_rejected() {
        // 15 minor / 17 major leaves minute 16 unclassifiable.
        let yaml = valid_yaml().replace("late_major_threshold_minutes: 16", "late_major_threshold_minutes: 17");
        let config = parse(&yaml);
        let result = config.validate();
        match result {
            Err(EngineError::ConfigValidation { field, .. }) => {
                assert_eq!(field, "late_major_threshold_minutes");
            }
            other => panic!("Expected ConfigValidation error, got {:?}", other),
        }
    }

    #[test]
    fn test_band_overlap_is_rejected() {
        // 15 minor / 15 major grades minute 15 both ways.
        let yaml = valid_yaml().replace("late_major_threshold_minutes: 16", "late_major_threshold_minutes: 15");
        let config = parse(&yaml);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_dedup_window_is_rejected() {
        let yaml = valid_yaml().replace("dedup_window_seconds: 30", "dedup_window_seconds: 0");
        let config = parse(&yaml);
        match config.validate() {
            Err(EngineError::ConfigValidation { field, .. }) => {
                assert_eq!(field, "dedup_window_seconds");
            }
            other => panic!("Expected ConfigValidation error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_match_tolerance_is_rejected() {
        let yaml = valid_yaml().replace(
            "punch_match_tolerance_minutes: 30",
            "punch_match_tolerance_minutes: 0",
        );
        assert!(parse(&yaml).validate().is_err());
    }

    #[test]
    fn test_negative_checkin_tolerance_is_rejected() {
        let yaml = valid_yaml().replace(
            "checkin_tolerance_minutes: 5",
            "checkin_tolerance_minutes: -1",
        );
        assert!(parse(&yaml).validate().is_err());
    }

    #[test]
    fn test_ceiling_below_tolerance_is_rejected() {
        // Tolerance 20 with ceiling 15 would grade minutes 16-20 both
        // on-time and minor.
        let yaml = valid_yaml()
            .replace("checkin_tolerance_minutes: 5", "checkin_tolerance_minutes: 20");
        assert!(parse(&yaml).validate().is_err());
    }

    #[test]
    fn test_enabled_escalation_needs_positive_limit() {
        let yaml = valid_yaml()
            .replace("enabled: false", "enabled: true")
            .replace("minor_repeat_limit: 3", "minor_repeat_limit: 0");
        let config = parse(&yaml);
        match config.validate() {
            Err(EngineError::ConfigValidation { field, .. }) => {
                assert_eq!(field, "escalation.minor_repeat_limit");
            }
            other => panic!("Expected ConfigValidation error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_infraction_limit_is_rejected() {
        let yaml = valid_yaml().replace("infraction_limit: 3", "infraction_limit: 0");
        assert!(parse(&yaml).validate().is_err());
    }

    #[test]
    fn test_non_numeric_threshold_is_a_parse_error() {
        let yaml = valid_yaml().replace(
            "checkin_tolerance_minutes: 5",
            "checkin_tolerance_minutes: five",
        );
        let result: Result<ReconciliationConfig, _> = serde_yaml::from_str(&yaml);
        assert!(result.is_err());
    }
}
