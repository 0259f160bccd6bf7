//! Device-facing backend URLs
//!
//! External devices (ESP32 boards, scripts, a browser tab) push readings to
//! the backend canister over raw HTTP. These helpers build the URLs the
//! dashboard shows for copying.

use crate::config::ResolverSettings;
use crate::types::ResolvedConfig;

/// URLs for one backend canister
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEndpoints {
    identifier: String,
    base_url: String,
}

impl BackendEndpoints {
    /// `None` for an empty identifier, so callers can show a
    /// "configuration unavailable" state instead of a broken URL
    pub fn new(identifier: &str, host_suffix: &str) -> Option<Self> {
        if identifier.is_empty() {
            return None;
        }

        Some(Self {
            identifier: identifier.to_string(),
            base_url: format!("https://{}.{}", identifier, host_suffix.trim_matches('.')),
        })
    }

    /// Endpoints for whatever the resolver produced
    pub fn from_resolved(config: &ResolvedConfig, settings: &ResolverSettings) -> Option<Self> {
        config
            .backend_identifier()
            .and_then(|id| Self::new(id, &settings.host_suffix))
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// `https://<identifier>.<host-suffix>`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET endpoint that records a single reading
    pub fn log_url(&self, value: f64) -> String {
        format!("{}/log?value={}", self.base_url, value)
    }

    /// All readings as JSON
    pub fn readings_url(&self) -> String {
        format!("{}/readings", self.base_url)
    }

    /// Alias of `/readings`
    pub fn data_url(&self) -> String {
        format!("{}/data", self.base_url)
    }
}
