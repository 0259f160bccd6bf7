//! Backend identifier resolution
//!
//! Tiers are consulted in a fixed order and the first non-empty value wins:
//! 1. Build-time values (`BuildTimeValues`)
//! 2. Injected global (`GlobalBindings`)
//! 3. Session store (`crate::session::SessionStore`)
//! 4. Remote config document (`crate::fetch::ConfigFetcher`)
//!
//! The outcome, success or not, is cached in a `ConfigCache` until
//! explicitly cleared.

mod build_time;
mod globals;
mod cache;
mod runtime;

pub use build_time::{BuildTimeValues, BUILD_TIME_NAMES};
pub use globals::{GlobalBindings, inject_global};
pub use cache::ConfigCache;
pub use runtime::{RuntimeConfigResolver, ResolverBuilder};
