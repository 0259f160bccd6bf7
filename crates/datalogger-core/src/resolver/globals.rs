//! Globals injected by the hosting shell

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

// Process-wide bindings, shared by every resolver built with the defaults
static PROCESS_BINDINGS: Lazy<Arc<GlobalBindings>> = Lazy::new(|| Arc::new(GlobalBindings::new()));

/// Named values set from outside the resolver before it first runs
///
/// The hosting shell (a webview wrapper, a launcher script) writes the
/// canister ID here; the resolver only reads.
#[derive(Debug, Default)]
pub struct GlobalBindings {
    values: RwLock<HashMap<String, String>>,
}

impl GlobalBindings {
    /// A private set of bindings, isolated from the process-wide one
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide bindings
    pub fn process() -> Arc<GlobalBindings> {
        Arc::clone(&PROCESS_BINDINGS)
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.values.read().get(name).cloned()
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.values.write().remove(name)
    }
}

/// Set a process-wide binding
pub fn inject_global(name: impl Into<String>, value: impl Into<String>) {
    PROCESS_BINDINGS.set(name, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_roundtrip() {
        let bindings = GlobalBindings::new();
        assert_eq!(bindings.get("CANISTER_ID_BACKEND"), None);

        bindings.set("CANISTER_ID_BACKEND", "abc123");
        assert_eq!(bindings.get("CANISTER_ID_BACKEND"), Some("abc123".to_string()));

        assert_eq!(bindings.remove("CANISTER_ID_BACKEND"), Some("abc123".to_string()));
        assert_eq!(bindings.get("CANISTER_ID_BACKEND"), None);
    }

    #[test]
    fn test_inject_global_is_process_wide() {
        inject_global("TEST_INJECT_GLOBAL_XYZ", "value");
        assert_eq!(GlobalBindings::process().get("TEST_INJECT_GLOBAL_XYZ"), Some("value".to_string()));
        GlobalBindings::process().remove("TEST_INJECT_GLOBAL_XYZ");
    }
}
