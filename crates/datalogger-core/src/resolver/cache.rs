//! Holder for the resolved configuration

use parking_lot::RwLock;

use crate::types::ResolvedConfig;

/// The single cached [`ResolvedConfig`]
///
/// Populated once by a completed resolution and reused until cleared.
/// Each resolver owns an `Arc<ConfigCache>`, so tests can give every case
/// its own cache instead of sharing the process-wide one.
#[derive(Debug, Default)]
pub struct ConfigCache {
    slot: RwLock<Option<ResolvedConfig>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<ResolvedConfig> {
        self.slot.read().clone()
    }

    pub fn is_populated(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Replace the cached record as a whole
    pub fn install(&self, config: ResolvedConfig) {
        *self.slot.write() = Some(config);
    }

    /// Drop the cached record, returning it
    pub fn clear(&self) -> Option<ResolvedConfig> {
        self.slot.write().take()
    }
}
