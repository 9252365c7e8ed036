//! Configuration loading for HPUI.
//!
//! [`ConfigLoader::load`] looks for a TOML file in this order:
//!
//! 1. the path in the `HPUI_CONFIG` environment variable,
//! 2. `config.toml` in the application config directory
//!    (see [`crate::utils::paths::get_app_config_dir`]).
//!
//! A missing file is not an error: the default [`CoreConfig`] is used. Whatever
//! is loaded is then validated; logging values are normalized and relative log
//! file paths are resolved against the application state directory.

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::paths::{get_app_config_dir, get_app_state_dir};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "HPUI_CONFIG";

/// Namespace for configuration loading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration from the default locations.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let path = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => get_app_config_dir()?.join("config.toml"),
        };
        Self::load_from_path(&path)
    }

    /// Loads `path`, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ReadError`] for I/O failures other than "not found".
    /// - [`ConfigError::ParseError`] for malformed TOML.
    /// - [`ConfigError::ValidationError`] for unusable values.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                tracing::debug!("ConfigLoader: loaded {}", path.display());
                Self::load_from_str(&content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("ConfigLoader: {} not found, using defaults", path.display());
                let mut config = CoreConfig::default();
                Self::validate_config(&mut config)?;
                Ok(config)
            }
            Err(source) => Err(CoreError::Config(ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            })),
        }
    }

    /// Parses and validates configuration text.
    pub fn load_from_str(content: &str) -> Result<CoreConfig, CoreError> {
        let mut config: CoreConfig = if content.trim().is_empty() {
            CoreConfig::default()
        } else {
            toml::from_str(content).map_err(ConfigError::ParseError)?
        };
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Normalizes and validates a parsed configuration in place.
    pub fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => config.logging.level = level_lower,
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))));
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => config.logging.format = format_lower,
            _ => {
                return Err(CoreError::Config(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))));
            }
        }

        if let Some(file_path) = &config.logging.file_path {
            if file_path.is_relative() {
                config.logging.file_path = Some(get_app_state_dir()?.join(file_path));
            }
        }

        config.interaction.validate()?;
        Ok(())
    }
}
