//! Remote config document loading
//!
//! The lowest-priority tier: a small JSON document (`/env.json`) served next
//! to the dashboard, carrying values that were not known at build time.

mod error;
mod traits;
mod http;
mod mock;

pub use error::{FetchError, FetchResult};
pub use traits::ConfigFetcher;
pub use http::{HttpConfigFetcher, extract_identifier};
pub use mock::{MockConfigFetcher, MockFetchMode};
