use hpui_core::{ConfigError, CoreError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors of the interaction layer.
///
/// Frame processing itself never fails. Only setup (configuration, replay
/// scenarios) can.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("Invalid interaction configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Failed to read scenario from {path:?}")]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scenario: {0}")]
    ScenarioParse(#[from] toml::de::Error),

    #[error("Invalid scenario: {0}")]
    Scenario(String),

    /// The engine was disposed and gave up its clock.
    #[error("Interactor has been disposed")]
    Disposed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_converts() {
        let err: InteractionError = ConfigError::ValidationError("selection_radius must be > 0".into()).into();
        assert!(matches!(err, InteractionError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Invalid interaction configuration: Configuration validation failed: selection_radius must be > 0"
        );
    }

    #[test]
    fn test_scenario_read_keeps_source() {
        let err = InteractionError::ScenarioRead {
            path: PathBuf::from("/missing.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
    }
}
