//! Default configuration values for HPUI.
//!
//! These functions back the `#[serde(default = ...)]` attributes on the
//! configuration structs so that a partially specified file still produces a
//! complete configuration.

use std::path::PathBuf;

/// Default log level (`"info"`).
pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

/// No log file unless one is configured.
pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

/// Default log format (`"text"`).
pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

/// Time (seconds) after which a stationary contact is no longer a quick tap.
pub(crate) fn default_tap_time_threshold() -> f32 {
    0.3
}

/// Displacement (meters) beyond which a contact becomes a gesture.
pub(crate) fn default_tap_distance_threshold() -> f32 {
    0.01
}

/// Distance (meters) under which a hovering region may be selected.
pub(crate) fn default_selection_radius() -> f32 {
    0.015
}

/// Distance (meters) under which a region counts as hovered.
pub(crate) fn default_hover_radius() -> f32 {
    0.015
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_false() -> bool {
    false
}
