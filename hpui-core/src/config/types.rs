//! Configuration data structures for HPUI.
//!
//! These structs are populated by deserializing TOML. Missing fields take their
//! values from [`super::defaults`], and unknown fields are rejected via
//! `#[serde(deny_unknown_fields)]`.

use super::defaults;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// ```
/// use hpui_core::config::LoggingConfig;
///
/// let log_config: LoggingConfig = toml::from_str(r#"level = "debug""#).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, None);
/// assert_eq!(log_config.format, "text");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of "trace", "debug", "info", "warn", "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths are resolved against the state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_log_level(),
            file_path: defaults::default_log_file_path(),
            format: defaults::default_log_format(),
        }
    }
}

/// Thresholds and selection policy for the tap/gesture engine.
///
/// Constructed once per interactor. Every threshold and radius must be a finite
/// positive number; see [`InteractionConfig::validate`].
///
/// ```
/// use hpui_core::config::InteractionConfig;
///
/// let config: InteractionConfig = toml::from_str(r#"
/// tap_time_threshold = 0.25
/// select_only_priority_target = false
/// "#).unwrap();
/// assert_eq!(config.tap_time_threshold, 0.25);
/// assert_eq!(config.tap_distance_threshold, 0.01);
/// assert!(!config.select_only_priority_target);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InteractionConfig {
    /// Seconds. A contact held longer than this is "too slow to be a quick tap".
    #[serde(default = "defaults::default_tap_time_threshold")]
    pub tap_time_threshold: f32,
    /// Meters. Moving further than this from the start point makes a gesture.
    #[serde(default = "defaults::default_tap_distance_threshold")]
    pub tap_distance_threshold: f32,
    /// Meters. Candidates closer than this may be selected.
    #[serde(default = "defaults::default_selection_radius")]
    pub selection_radius: f32,
    /// Meters. Range used by candidate discovery for hovering.
    #[serde(default = "defaults::default_hover_radius")]
    pub hover_radius: f32,
    /// When set, only the priority winner may start a new contact.
    #[serde(default = "defaults::default_true")]
    pub select_only_priority_target: bool,
    /// When set, exceeding `tap_time_threshold` without moving classifies the
    /// contact as a hold gesture instead of waiting for release.
    #[serde(default = "defaults::default_false")]
    pub time_threshold_forces_gesture: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            tap_time_threshold: defaults::default_tap_time_threshold(),
            tap_distance_threshold: defaults::default_tap_distance_threshold(),
            selection_radius: defaults::default_selection_radius(),
            hover_radius: defaults::default_hover_radius(),
            select_only_priority_target: defaults::default_true(),
            time_threshold_forces_gesture: defaults::default_false(),
        }
    }
}

impl InteractionConfig {
    /// Rejects thresholds that would make classification meaningless.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ValidationError`] if any threshold or radius is not a
    /// finite number greater than zero, or if the selection radius exceeds the
    /// hover radius.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tap_time_threshold", self.tap_time_threshold),
            ("tap_distance_threshold", self.tap_distance_threshold),
            ("selection_radius", self.selection_radius),
            ("hover_radius", self.hover_radius),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a finite value greater than 0, got {}",
                    name, value
                )));
            }
        }

        if self.selection_radius > self.hover_radius {
            return Err(ConfigError::ValidationError(format!(
                "selection_radius ({}) must not exceed hover_radius ({})",
                self.selection_radius, self.hover_radius
            )));
        }
        Ok(())
    }
}

/// Root configuration structure.
///
/// ```
/// use hpui_core::config::CoreConfig;
///
/// let config: CoreConfig = toml::from_str(r#"
/// [logging]
/// level = "warn"
///
/// [interaction]
/// selection_radius = 0.01
/// "#).unwrap();
/// assert_eq!(config.logging.level, "warn");
/// assert_eq!(config.interaction.selection_radius, 0.01);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_interaction_config_defaults() {
        let config = InteractionConfig::default();
        assert_eq!(config.tap_time_threshold, 0.3);
        assert_eq!(config.tap_distance_threshold, 0.01);
        assert_eq!(config.selection_radius, 0.015);
        assert_eq!(config.hover_radius, 0.015);
        assert!(config.select_only_priority_target);
        assert!(!config.time_threshold_forces_gesture);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_core_config_deserialize_empty_uses_defaults() {
        let config: CoreConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn test_core_config_deserialize_json() {
        let json_data = r#"{ "interaction": { "hover_radius": 0.03 } }"#;
        let config: CoreConfig = serde_json::from_str(json_data).expect("Failed to deserialize CoreConfig");
        assert_eq!(config.interaction.hover_radius, 0.03);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = toml::from_str::<InteractionConfig>("tap_threshold = 0.2");
        assert!(result.is_err());
    }

    #[rstest]
    #[case::zero_time(InteractionConfig { tap_time_threshold: 0.0, ..Default::default() }, "tap_time_threshold")]
    #[case::negative_distance(InteractionConfig { tap_distance_threshold: -0.01, ..Default::default() }, "tap_distance_threshold")]
    #[case::nan_selection(InteractionConfig { selection_radius: f32::NAN, ..Default::default() }, "selection_radius")]
    #[case::infinite_hover(InteractionConfig { hover_radius: f32::INFINITY, ..Default::default() }, "hover_radius")]
    #[case::selection_beyond_hover(InteractionConfig { selection_radius: 0.02, hover_radius: 0.015, ..Default::default() }, "must not exceed")]
    fn test_validate_rejects(#[case] config: InteractionConfig, #[case] expected: &str) {
        match config.validate() {
            Err(ConfigError::ValidationError(msg)) => assert!(msg.contains(expected), "unexpected message: {}", msg),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
