//! Application-specific directory resolution.
//!
//! Relies on `directories-next`. On Linux the config directory is typically
//! `~/.config/hpui` and the state directory `~/.local/share/hpui/state`.

use crate::error::{ConfigError, CoreError};
use directories_next::ProjectDirs;
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "HPUI";
const APPLICATION: &str = "hpui";

fn project_dirs(dir_type: &str) -> Result<ProjectDirs, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        CoreError::Config(ConfigError::DirectoryUnavailable {
            dir_type: dir_type.to_string(),
        })
    })
}

/// Returns the directory holding `config.toml`.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App Config").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Returns the directory for runtime state such as log files.
///
/// `ProjectDirs` has no state directory, so this is a `state` folder inside
/// the local data directory.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    project_dirs("App State").map(|dirs| dirs.data_local_dir().join("state"))
}
