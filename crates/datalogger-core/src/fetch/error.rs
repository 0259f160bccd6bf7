//! Remote config fetch errors

use thiserror::Error;

/// Errors that can occur while loading the remote config document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Connection refused, DNS failure, reset mid-body, etc.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status
    #[error("HTTP status {0}")]
    Http(u16),

    /// Body was not a JSON object
    #[error("Malformed config document: {0}")]
    Malformed(String),

    /// Body parsed but none of the recognized keys held a non-empty string
    #[error("No backend identifier in config document")]
    MissingIdentifier,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Http(status.as_u16())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
