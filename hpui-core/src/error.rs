//! Error handling for the HPUI core layer.
//!
//! The main error type for this crate is [`CoreError`], which wraps the more
//! specific [`ConfigError`] and [`LoggingError`]. All of them are built with
//! `thiserror`.
//!
//! Runtime interaction decisions never produce errors; the only fatal
//! condition in HPUI is a configuration that cannot be used.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for HPUI.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised while installing the global `tracing` subscriber.
    #[error("Logging Error: {0}")]
    Logging(#[from] LoggingError),

    /// Filesystem errors outside of config reading (e.g. creating a log directory).
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file exists but could not be read.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML or does not match the schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Values parsed fine but are unusable (e.g. a non-positive threshold).
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A required base directory could not be determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Error type for logging setup.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The subscriber could not be installed or the config is unusable.
    #[error("Failed to initialize logging: {0}")]
    InitializationFailure(String),

    /// A `RUST_LOG` filter directive could not be parsed.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),
}
