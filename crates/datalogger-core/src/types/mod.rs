//! Core types for configuration resolution

mod resolved;
mod tier;

pub use resolved::{ResolvedConfig, ConfigSource};
pub use tier::{TierOutcome, TierError};
