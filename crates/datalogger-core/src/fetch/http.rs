//! reqwest-backed fetcher for `/env.json`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde_json::Value;

use crate::config::ResolverSettings;
use super::error::{FetchError, FetchResult};
use super::traits::ConfigFetcher;

/// Loads the remote config document over HTTP
///
/// Sends `Cache-Control: no-cache` so a redeployed canister ID is picked up
/// without waiting on intermediary caches. The timeout covers the whole
/// exchange, body included.
///
/// # Example
///
/// ```no_run
/// use datalogger_core::fetch::{ConfigFetcher, HttpConfigFetcher};
/// use datalogger_core::ResolverSettings;
///
/// # async fn run() {
/// let fetcher = HttpConfigFetcher::from_settings(&ResolverSettings::default());
/// if let Ok(id) = fetcher.fetch_identifier().await {
///     println!("backend canister: {}", id);
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfigFetcher {
    client: Client,
    url: String,
    timeout: Duration,
    identifier_keys: Vec<String>,
}

impl HttpConfigFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration, identifier_keys: Vec<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout,
            identifier_keys,
        }
    }

    pub fn from_settings(settings: &ResolverSettings) -> Self {
        Self::new(
            settings.config_url.clone(),
            settings.timeout(),
            settings.identifier_keys.clone(),
        )
    }

    /// Reuse an existing client (connection pool, proxy settings)
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl ConfigFetcher for HttpConfigFetcher {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_identifier(&self) -> FetchResult<String> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        extract_identifier(&body, &self.identifier_keys)
    }
}

/// Pull the identifier out of a config document body
///
/// Keys are tried in order; the first one holding a non-empty string wins.
pub fn extract_identifier(body: &str, keys: &[String]) -> FetchResult<String> {
    let document: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::Malformed(e.to_string()))?;

    let object = document
        .as_object()
        .ok_or_else(|| FetchError::Malformed("expected a JSON object".to_string()))?;

    keys.iter()
        .filter_map(|key| object.get(key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(FetchError::MissingIdentifier)
}
