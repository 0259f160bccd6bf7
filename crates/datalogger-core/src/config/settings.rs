//! Resolver settings and their defaults

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::session::SESSION_KEY;

/// Where the remote config document lives (local replica by default)
pub const DEFAULT_CONFIG_URL: &str = "http://127.0.0.1:4943/env.json";

/// Remote config fetch timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Host suffix for raw HTTP access to a canister
pub const DEFAULT_HOST_SUFFIX: &str = "raw.icp0.io";

/// Tunables for the resolver
///
/// Every field has a default, so a settings file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Full URL of the remote config document
    pub config_url: String,
    /// Remote fetch timeout in milliseconds
    pub timeout_ms: u64,
    /// Session store key holding a previously loaded identifier
    pub session_key: String,
    /// Keys accepted in the remote document, in priority order
    pub identifier_keys: Vec<String>,
    /// Binding name the hosting shell injects the identifier under
    pub injected_global: String,
    /// Host suffix used when building device-facing endpoint URLs
    pub host_suffix: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            config_url: DEFAULT_CONFIG_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            session_key: SESSION_KEY.to_string(),
            identifier_keys: vec!["CANISTER_ID_BACKEND".to_string(), "canisterId".to_string()],
            injected_global: "CANISTER_ID_BACKEND".to_string(),
            host_suffix: DEFAULT_HOST_SUFFIX.to_string(),
        }
    }
}

impl ResolverSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn with_config_url(mut self, url: impl Into<String>) -> Self {
        self.config_url = url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
