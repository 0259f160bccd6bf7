//! YAML settings file
//!
//! User-level settings live at `~/.config/datalogger/config.yaml`.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::ResolverSettings;

/// Errors that can occur while reading or writing settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings file on disk
///
/// # Example
///
/// ```no_run
/// use datalogger_core::config::SettingsFile;
///
/// let settings = SettingsFile::user().load().unwrap_or_default();
/// println!("remote config: {}", settings.config_url);
/// ```
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/datalogger/config.yaml` (platform config dir)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("datalogger").join("config.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load settings, falling back to defaults when the file is absent
    pub fn load(&self) -> SettingsResult<ResolverSettings> {
        if !self.path.exists() {
            return Ok(ResolverSettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ResolverSettings::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self, settings: &ResolverSettings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
