//! Data Logger Core
//!
//! Runtime configuration for the data logger dashboard.
//! The dashboard needs one thing before it can talk to its backend: the
//! backend canister ID. This crate finds it through an ordered chain of
//! sources and caches the answer for the rest of the process.
//!
//! ## Resolution order
//!
//! 1. Build-time values (`VITE_CANISTER_ID_BACKEND`, `CANISTER_ID_BACKEND`)
//! 2. A global injected by the hosting shell
//! 3. The session store (populated by an earlier remote load)
//! 4. The remote `/env.json` document
//!
//! ```rust,ignore
//! use datalogger_core::RuntimeConfigResolver;
//!
//! let resolver = RuntimeConfigResolver::global();
//! let config = resolver.resolve().await;
//!
//! match config.backend_identifier() {
//!     Some(id) => println!("backend {} (from {})", id, config.source()),
//!     None => println!("configuration unavailable"),
//! }
//! ```

pub mod types;
pub mod logging;
pub mod session;
pub mod fetch;
pub mod config;
pub mod resolver;
pub mod endpoints;

// Re-export commonly used types
pub use types::{ResolvedConfig, ConfigSource, TierOutcome, TierError};

pub use session::{
    SessionStore, StoreError, StoreResult,
    MemorySessionStore, FileSessionStore, DisabledSessionStore,
};

pub use fetch::{ConfigFetcher, HttpConfigFetcher, FetchError, FetchResult};

pub use config::{ResolverSettings, SettingsFile, SettingsError};

pub use logging::{Logger, NoOpLogger, ConsoleLogger};

pub use resolver::{
    RuntimeConfigResolver, ResolverBuilder, ConfigCache,
    BuildTimeValues, GlobalBindings,
};

pub use endpoints::BackendEndpoints;
