//! Session-scoped key/value storage
//!
//! The resolver remembers a remotely loaded canister ID here so the next
//! resolution in the same session skips the network. Built-in stores:
//! - `MemorySessionStore`: lives as long as the process
//! - `FileSessionStore`: a JSON file that survives restarts
//! - `DisabledSessionStore`: storage blocked by the environment

mod traits;
mod memory_store;
mod file_store;
mod disabled_store;

pub use traits::{SessionStore, StoreError, StoreResult, SESSION_KEY};
pub use memory_store::MemorySessionStore;
pub use file_store::FileSessionStore;
pub use disabled_store::DisabledSessionStore;
