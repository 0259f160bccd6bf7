//! A session store that refuses every operation

use super::traits::{SessionStore, StoreError, StoreResult};

/// Stand-in for environments where session storage is blocked
///
/// Every call fails with [`StoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct DisabledSessionStore {
    reason: String,
}

impl Default for DisabledSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DisabledSessionStore {
    pub fn new() -> Self {
        Self::with_reason("session storage disabled")
    }

    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn unavailable(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

impl SessionStore for DisabledSessionStore {
    fn name(&self) -> &str {
        "disabled"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(self.unavailable())
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(self.unavailable())
    }

    fn remove(&self, _key: &str) -> StoreResult<()> {
        Err(self.unavailable())
    }
}
