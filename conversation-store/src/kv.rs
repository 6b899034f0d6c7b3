//! The narrow storage seam the conversation store writes through.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Minimal key-value contract: string keys, string values, fallible writes.
///
/// `set` and `remove` report success as a bool instead of an error; the
/// store treats persistence as best-effort and only logs failures.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// In-memory backend. The default for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("kv mutex poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .lock()
            .expect("kv mutex poisoned")
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries
            .lock()
            .expect("kv mutex poisoned")
            .remove(key)
            .is_some()
    }
}

/// File-per-key backend: each key maps to one JSON file under a directory.
///
/// Write failures (missing directory, quota, permissions) are logged and
/// reported as `false`, never raised.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), error = %err, "failed to create storage directory");
            return false;
        }
        match std::fs::write(self.path_for(key), value) {
            Ok(()) => true,
            Err(err) => {
                warn!(key, error = %err, "failed to persist storage blob");
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        std::fs::remove_file(self.path_for(key)).is_ok()
    }
}
