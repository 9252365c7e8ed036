//! # HPUI Core Library (`hpui-core`)
//!
//! Foundation shared by the HPUI interaction crates:
//!
//! - **Error Handling**: [`CoreError`] and the more specific [`ConfigError`]
//!   and [`LoggingError`].
//! - **Configuration**: TOML-backed [`CoreConfig`] with the interaction
//!   thresholds ([`InteractionConfig`]) and logging settings
//!   ([`LoggingConfig`]), loaded and validated by [`ConfigLoader`].
//! - **Logging**: `tracing` subscriber setup for console and rolling files.
//! - **Types**: `glam` vectors and the [`SurfaceRect`] projection helper.
//!
//! ```rust,ignore
//! use hpui_core::{ConfigLoader, CoreError};
//! use hpui_core::logging::init_logging;
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     init_logging(&config.logging, false)?;
//!     tracing::info!("HPUI core initialized.");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, CoreConfig, InteractionConfig, LoggingConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
pub use types::{SurfaceRect, Vec2, Vec3};
