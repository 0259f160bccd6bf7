//! Core trait and errors for session storage

use thiserror::Error;

/// Key under which the backend canister ID is persisted
pub const SESSION_KEY: &str = "CANISTER_ID_BACKEND";

/// Errors that can occur during session store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session store not available: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for session storage implementations
///
/// Every operation is fallible: a store may be blocked entirely (private
/// browsing, a read-only filesystem). Callers in this crate treat any error
/// as "nothing stored" and move on.
///
/// # Example
///
/// ```
/// use datalogger_core::session::{SessionStore, MemorySessionStore, SESSION_KEY};
///
/// let store = MemorySessionStore::new();
/// store.set(SESSION_KEY, "uxrrr-q7777-77774-qaaaq-cai").unwrap();
/// assert_eq!(store.get(SESSION_KEY).unwrap().as_deref(), Some("uxrrr-q7777-77774-qaaaq-cai"));
/// ```
pub trait SessionStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Whether the store can currently be used
    fn is_available(&self) -> bool {
        true
    }

    /// Read a value
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;
}
