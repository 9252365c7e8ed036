//! Logging setup for HPUI, built on the `tracing` ecosystem.
//!
//! Two entry points:
//! - [`init_minimal_logging`] for tests and early startup (stderr, `RUST_LOG`).
//! - [`init_logging`] for configured setups: a stdout layer plus an optional
//!   daily-rolling file layer, each in text or JSON format.

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

use once_cell::sync::Lazy;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps the file writer alive so buffered lines are flushed on shutdown.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Installs a stderr subscriber filtered by `RUST_LOG` (default "info").
///
/// Errors (e.g. a subscriber is already installed) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Maps a config level string onto a filter directive.
fn parse_level(level: &str) -> Result<Level, LoggingError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        invalid => Err(LoggingError::InitializationFailure(format!(
            "Invalid log level in config: {}",
            invalid
        ))),
    }
}

/// Filter for one output layer: `RUST_LOG` when set, else the configured level.
fn build_filter(level: Level, env_override: Option<&str>) -> Result<EnvFilter, LoggingError> {
    match env_override.map(str::trim).filter(|directives| !directives.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| LoggingError::FilterError(format!("invalid RUST_LOG '{}': {}", directives, e))),
        None => Ok(EnvFilter::new(level.to_string())),
    }
}

fn create_file_layer(log_path: &Path, format: &str) -> Result<(BoxedLayer, WorkerGuard), CoreError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            utils::fs::ensure_dir_exists(parent)?;
        }
    }

    let file_appender = tracing_appender::rolling::daily(
        log_path.parent().unwrap_or_else(|| Path::new(".")),
        log_path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("hpui.log")),
    );
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer = match format.to_lowercase().as_str() {
        "json" => fmt::layer().json().with_writer(writer).with_ansi(false).boxed(),
        _ => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
    };
    Ok((layer, guard))
}

/// Installs the global subscriber described by `config`.
///
/// With `is_reload` set, a subscriber that is already installed is not an
/// error: the call only swaps the file guard.
///
/// # Errors
///
/// [`CoreError::Logging`] for an invalid level, a malformed `RUST_LOG` or,
/// on first setup, if a global subscriber was already set. [`CoreError::Filesystem`] if the log
/// directory cannot be created.
pub fn init_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    let level = parse_level(&config.level)?;
    let env_override = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_override = env_override.as_deref();

    let stdout_layer = match config.format.to_lowercase().as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(stdout)
            .with_ansi(false)
            .with_filter(build_filter(level, env_override)?)
            .boxed(),
        _ => fmt::layer()
            .with_writer(stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_filter(build_filter(level, env_override)?)
            .boxed(),
    };

    let mut layers: Vec<BoxedLayer> = vec![stdout_layer];
    let mut new_guard = None;
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, &config.format)?;
        layers.push(file_layer.with_filter(build_filter(level, env_override)?).boxed());
        new_guard = Some(guard);
    }

    let result = Registry::default().with(layers).try_init();

    match LOG_WORKER_GUARD.lock() {
        Ok(mut slot) => *slot = new_guard,
        Err(e) => eprintln!("[ERROR] Failed to lock LOG_WORKER_GUARD: {}. Log flushing may be affected.", e),
    }

    match result {
        Ok(()) => Ok(()),
        Err(e) if is_reload => {
            tracing::info!("Logging re-initialization requested; keeping existing subscriber ({})", e);
            Ok(())
        }
        Err(e) => Err(CoreError::Logging(LoggingError::InitializationFailure(format!(
            "Failed to set global tracing subscriber. Was it already initialized? Error: {}",
            e
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("trace", Level::TRACE)]
    #[case("DEBUG", Level::DEBUG)]
    #[case("Info", Level::INFO)]
    #[case("warn", Level::WARN)]
    #[case("error", Level::ERROR)]
    fn test_parse_level_accepts_known_levels(#[case] input: &str, #[case] expected: Level) {
        assert_eq!(parse_level(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_level_rejects_unknown() {
        match parse_level("supertrace") {
            Err(LoggingError::InitializationFailure(msg)) => {
                assert!(msg.contains("Invalid log level in config: supertrace"))
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_build_filter_prefers_env_directives() {
        let filter = build_filter(Level::WARN, Some("hpui_interaction=trace")).unwrap();
        assert!(filter.to_string().to_lowercase().contains("hpui_interaction=trace"));

        let fallback = build_filter(Level::WARN, Some("  ")).unwrap();
        assert_eq!(fallback.to_string().to_lowercase(), "warn");
    }

    #[test]
    fn test_build_filter_rejects_malformed_env_directive() {
        match build_filter(Level::INFO, Some("hpui_interaction=loud")) {
            Err(LoggingError::FilterError(msg)) => assert!(msg.contains("hpui_interaction=loud")),
            other => panic!("Unexpected result: {:?}", other.map(|f| f.to_string())),
        }
    }

    #[test]
    fn test_init_logging_invalid_level_returns_error() {
        let config = LoggingConfig {
            level: "supertrace".to_string(),
            file_path: None,
            format: "text".to_string(),
        };
        assert!(matches!(init_logging(&config, false), Err(CoreError::Logging(_))));
    }

    #[test]
    fn test_create_file_layer_ensures_parent_dir_exists() {
        let temp_dir = TempDir::new().unwrap();
        let nested_log_path = temp_dir.path().join("logs/nested/hpui.log");

        let result = create_file_layer(&nested_log_path, "json");
        assert!(result.is_ok(), "create_file_layer failed: {:?}", result.err());
        assert!(nested_log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_init_minimal_logging_runs_twice() {
        init_minimal_logging();
        init_minimal_logging();
        tracing::info!("minimal logging test message");
    }
}
