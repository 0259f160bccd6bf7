//! Mock fetcher for testing
//!
//! Deterministic outcomes without a network, with an optional simulated
//! latency that respects the configured timeout.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::error::{FetchError, FetchResult};
use super::traits::ConfigFetcher;

/// What the mock returns once its latency has elapsed
#[derive(Debug, Clone)]
pub enum MockFetchMode {
    /// Return this identifier
    Identifier(String),
    /// Fail with this error
    Error(FetchError),
}

/// Mock config fetcher
#[derive(Debug)]
pub struct MockConfigFetcher {
    mode: MockFetchMode,
    latency: Duration,
    timeout: Duration,
    calls: AtomicUsize,
}

impl MockConfigFetcher {
    pub fn new(mode: MockFetchMode) -> Self {
        Self {
            mode,
            latency: Duration::ZERO,
            timeout: Duration::from_millis(crate::config::DEFAULT_TIMEOUT_MS),
            calls: AtomicUsize::new(0),
        }
    }

    /// A fetcher that always finds `identifier`
    pub fn identifier(identifier: impl Into<String>) -> Self {
        Self::new(MockFetchMode::Identifier(identifier.into()))
    }

    /// A fetcher that always fails with `error`
    pub fn failing(error: FetchError) -> Self {
        Self::new(MockFetchMode::Error(error))
    }

    /// Simulated response latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of fetches issued so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigFetcher for MockConfigFetcher {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    async fn fetch_identifier(&self) -> FetchResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.latency > self.timeout {
            tokio::time::sleep(self.timeout).await;
            return Err(FetchError::Timeout);
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match &self.mode {
            MockFetchMode::Identifier(id) => Ok(id.clone()),
            MockFetchMode::Error(err) => Err(err.clone()),
        }
    }
}
