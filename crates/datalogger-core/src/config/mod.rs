//! Resolver settings
//!
//! Defaults match the dashboard as deployed; a YAML file at
//! `~/.config/datalogger/config.yaml` can override any of them.

mod settings;
mod file;

pub use settings::{
    ResolverSettings, DEFAULT_CONFIG_URL, DEFAULT_TIMEOUT_MS, DEFAULT_HOST_SUFFIX,
};
pub use file::{SettingsFile, SettingsError, SettingsResult};
