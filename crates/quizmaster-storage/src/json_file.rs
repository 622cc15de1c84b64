//! JSON-file-backed key-value store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use quizmaster_core::traits::KeyValueStore;

/// A key-value store persisted as a single JSON object file.
///
/// This is the server-side stand-in for browser local storage: one logical
/// writer, last write wins, no locking across processes. Every mutation
/// rewrites the whole file; a failed write is logged and the in-memory view
/// keeps serving reads, which mirrors how the quiz degrades when storage is
/// unavailable.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing entries. A missing file is
    /// an empty store; an unreadable or malformed one is discarded with a
    /// warning, matching the treat-malformed-as-absent rule used everywhere
    /// else.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        let json = match serde_json::to_string_pretty(entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("cannot serialize state file: {e}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::warn!("cannot create state directory {}: {e}", parent.display());
                    return;
                }
            }
        }
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!("cannot write state file {}: {e}", self.path.display());
        }
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("discarding malformed state file {}: {e}", path.display());
            BTreeMap::new()
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(e) => {
            tracing::warn!("cannot read state file {}: {e}", path.display());
            BTreeMap::new()
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let store = JsonFileStore::open(&path);
            store.set("quizProgress", "3");
            store.set("currentScore", "2");
        }

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("quizProgress").as_deref(), Some("3"));
        assert_eq!(store.get("currentScore").as_deref(), Some("2"));

        store.remove("quizProgress");
        let reopened = JsonFileStore::open(&path);
        assert!(reopened.get("quizProgress").is_none());
        assert_eq!(reopened.get("currentScore").as_deref(), Some("2"));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nope.json"));
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn malformed_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "this is not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert!(store.get("quizProgress").is_none());

        // Writing through the store replaces the junk on disk.
        store.set("k", "v");
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dirs/state.json");
        let store = JsonFileStore::open(&path);
        store.set("k", "v");
        assert!(path.is_file());
    }
}
