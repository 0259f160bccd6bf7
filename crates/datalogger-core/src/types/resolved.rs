//! Resolved configuration record

use std::fmt;
use serde::{Deserialize, Serialize};

/// Which fallback tier produced the backend identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigSource {
    /// Embedded at compile time
    BuildTime,
    /// Set by the hosting shell before the resolver ran
    InjectedGlobal,
    /// Persisted by an earlier successful remote load
    SessionCache,
    /// Fetched from the remote config document
    RemoteConfig,
    /// No tier produced a value
    #[default]
    None,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSource::BuildTime => "build-time",
            ConfigSource::InjectedGlobal => "injected-global",
            ConfigSource::SessionCache => "session-cache",
            ConfigSource::RemoteConfig => "remote-config",
            ConfigSource::None => "none",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a resolution pass
///
/// `source` is [`ConfigSource::None`] exactly when `backend_identifier` is
/// absent, and `load_failed` is only ever set together with `load_attempted`.
/// The fields are private so only the constructors below can build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    backend_identifier: Option<String>,
    source: ConfigSource,
    load_attempted: bool,
    load_failed: bool,
}

impl ResolvedConfig {
    /// The record reported before anything has been resolved
    pub fn empty() -> Self {
        Self::default()
    }

    /// An identifier found by a local tier (no remote fetch involved)
    pub fn found(identifier: impl Into<String>, source: ConfigSource) -> Self {
        Self {
            backend_identifier: Some(identifier.into()),
            source,
            load_attempted: source == ConfigSource::RemoteConfig,
            load_failed: false,
        }
    }

    /// Every tier came up empty and the remote fetch failed
    pub fn unresolved() -> Self {
        Self {
            backend_identifier: None,
            source: ConfigSource::None,
            load_attempted: true,
            load_failed: true,
        }
    }

    /// The resolved backend canister ID
    pub fn backend_identifier(&self) -> Option<&str> {
        self.backend_identifier.as_deref()
    }

    /// Which tier supplied the identifier
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Whether the remote config fetch was attempted
    pub fn load_attempted(&self) -> bool {
        self.load_attempted
    }

    /// Whether the remote config fetch was attempted and failed
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    pub fn is_resolved(&self) -> bool {
        self.backend_identifier.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_strings() {
        assert_eq!(ConfigSource::BuildTime.as_str(), "build-time");
        assert_eq!(ConfigSource::InjectedGlobal.to_string(), "injected-global");
        assert_eq!(ConfigSource::SessionCache.as_str(), "session-cache");
        assert_eq!(ConfigSource::RemoteConfig.as_str(), "remote-config");
        assert_eq!(ConfigSource::None.as_str(), "none");
    }

    #[test]
    fn test_empty_record() {
        let config = ResolvedConfig::empty();
        assert_eq!(config.backend_identifier(), None);
        assert_eq!(config.source(), ConfigSource::None);
        assert!(!config.load_attempted());
        assert!(!config.load_failed());
        assert!(!config.is_resolved());
    }

    #[test]
    fn test_found_from_remote_marks_attempt() {
        let local = ResolvedConfig::found("abc", ConfigSource::SessionCache);
        assert!(!local.load_attempted());

        let remote = ResolvedConfig::found("abc", ConfigSource::RemoteConfig);
        assert_eq!(remote.backend_identifier(), Some("abc"));
        assert!(remote.load_attempted());
        assert!(!remote.load_failed());
        assert!(remote.is_resolved());
    }

    #[test]
    fn test_unresolved_keeps_flag_rules() {
        let config = ResolvedConfig::unresolved();
        assert_eq!(config.backend_identifier(), None);
        assert_eq!(config.source(), ConfigSource::None);
        assert!(config.load_attempted());
        assert!(config.load_failed());
    }

    #[test]
    fn test_serializes_camel_case() {
        let config = ResolvedConfig::found("abc123", ConfigSource::RemoteConfig);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["backendIdentifier"], "abc123");
        assert_eq!(json["source"], "remote-config");
        assert_eq!(json["loadAttempted"], true);
        assert_eq!(json["loadFailed"], false);

        let unresolved = serde_json::to_value(ResolvedConfig::unresolved()).unwrap();
        assert!(unresolved["backendIdentifier"].is_null());
        assert_eq!(unresolved["source"], "none");
    }
}
