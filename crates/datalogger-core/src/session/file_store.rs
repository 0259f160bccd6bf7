//! File-backed session store (JSON)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::logging::file_logger as log;
use super::traits::{SessionStore, StoreError, StoreResult};

/// Session store persisted as a flat JSON object on disk
///
/// The file is re-read on every access so several dashboard processes
/// sharing one session file see each other's writes. A missing file reads
/// as empty. If the parent directory does not exist the store reports
/// itself unavailable rather than creating it. Reads of a corrupt file
/// fail; writes replace it.
///
/// The caller picks the path, and with it the session's scope.
///
/// # Example
///
/// ```no_run
/// use datalogger_core::session::{FileSessionStore, SessionStore, SESSION_KEY};
///
/// let store = FileSessionStore::new("/run/user/1000/datalogger/session.json");
/// let cached = store.get(SESSION_KEY).ok().flatten();
/// ```
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_available(&self) -> StoreResult<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => Err(
                StoreError::Unavailable(format!("{} does not exist", parent.display())),
            ),
            _ => Ok(()),
        }
    }

    fn load(&self) -> StoreResult<BTreeMap<String, String>> {
        self.check_available()?;
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Contents to start a write from; a corrupt file counts as empty
    fn load_for_write(&self) -> StoreResult<(BTreeMap<String, String>, bool)> {
        match self.load() {
            Ok(values) => Ok((values, false)),
            Err(StoreError::Corrupt(e)) => {
                log::warn("SessionStore", &format!("Replacing corrupt {}: {}", self.path.display(), e));
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, values: &BTreeMap<String, String>) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl std::fmt::Debug for FileSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSessionStore")
            .field("path", &self.path)
            .field("exists", &self.path.exists())
            .finish()
    }
}

impl SessionStore for FileSessionStore {
    fn name(&self) -> &str {
        "file"
    }

    fn is_available(&self) -> bool {
        self.check_available().is_ok()
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        let (mut values, _) = self.load_for_write()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        let (mut values, corrupt) = self.load_for_write()?;
        if values.remove(key).is_some() || corrupt {
            self.save(&values)?;
        }
        Ok(())
    }
}
