//! Configuration management for HPUI.
//!
//! - [`types`]: the schema ([`CoreConfig`], [`LoggingConfig`], [`InteractionConfig`]).
//! - [`defaults`]: default values used by serde for missing fields.
//! - [`loader`]: [`ConfigLoader`], which locates, parses and validates TOML.
//!
//! ```rust,ignore
//! use hpui_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("tap threshold: {}s", config.interaction.tap_time_threshold),
//!     Err(e) => {
//!         hpui_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration loading failed: {}", e);
//!     }
//! }
//! ```

pub(crate) mod defaults;
pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, CONFIG_PATH_ENV};
pub use types::{CoreConfig, InteractionConfig, LoggingConfig};
