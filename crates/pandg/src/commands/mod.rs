//! Subcommand handlers.

pub mod colors;
pub mod completions;
pub mod config_cmd;
pub mod device_groups;
