//! Fetcher trait

use async_trait::async_trait;

use super::error::FetchResult;

/// Source of the backend identifier from a remote config document
///
/// Implementations:
/// - `HttpConfigFetcher`: `GET <config_url>` via reqwest
/// - Test doubles that count calls or fail on demand
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    /// Where the document is loaded from, for log output
    fn describe(&self) -> String;

    /// Load the document and extract the backend identifier
    ///
    /// Must give up once the configured timeout elapses.
    async fn fetch_identifier(&self) -> FetchResult<String>;
}
