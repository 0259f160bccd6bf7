//! Per-tier outcomes
//!
//! Every tier in the fallback chain reports one of these instead of
//! returning an error. The resolver folds over them in priority order.

use thiserror::Error;

use crate::fetch::FetchError;
use crate::session::StoreError;

/// Why a tier failed to produce a value
///
/// None of these reach the caller of the resolver; they are logged and the
/// chain moves on to the next tier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TierError {
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Remote config fetch timed out")]
    FetchTimeout,

    #[error("Remote config network error: {0}")]
    FetchNetwork(String),

    #[error("Remote config returned HTTP {0}")]
    FetchHttp(u16),

    #[error("Malformed remote config: {0}")]
    MalformedResponse(String),
}

impl From<StoreError> for TierError {
    fn from(err: StoreError) -> Self {
        TierError::StoreUnavailable(err.to_string())
    }
}

impl From<FetchError> for TierError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => TierError::FetchTimeout,
            FetchError::Network(msg) => TierError::FetchNetwork(msg),
            FetchError::Http(status) => TierError::FetchHttp(status),
            FetchError::Malformed(msg) => TierError::MalformedResponse(msg),
            FetchError::MissingIdentifier => {
                TierError::MalformedResponse("no recognized identifier field".to_string())
            }
        }
    }
}

/// What a single tier produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
    /// A non-empty value
    Found(String),
    /// Nothing there; expected, not an error
    NotFound,
    /// The tier could not be read
    Failed(TierError),
}

impl TierOutcome {
    /// Treat empty strings the same as missing values
    pub fn from_option(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => TierOutcome::Found(v),
            _ => TierOutcome::NotFound,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, TierOutcome::Found(_))
    }

    /// The found value, if any
    pub fn into_value(self) -> Option<String> {
        match self {
            TierOutcome::Found(v) => Some(v),
            _ => None,
        }
    }
}

impl<E: Into<TierError>> From<Result<Option<String>, E>> for TierOutcome {
    fn from(result: Result<Option<String>, E>) -> Self {
        match result {
            Ok(value) => TierOutcome::from_option(value),
            Err(e) => TierOutcome::Failed(e.into()),
        }
    }
}
