//! Small helpers shared by the config and logging modules.

pub mod fs;
pub mod paths;
