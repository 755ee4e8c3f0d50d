//! Persistent key-value storage for editor state.
//!
//! The store plays the role a browser's `localStorage` would: a handful of
//! string values under fixed keys, surviving across sessions. Reads and
//! writes are best effort. A failure is logged and the application carries
//! on with the in-memory buffer as the source of truth; nothing here is
//! ever fatal.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Store key for the markdown editor content snapshot.
pub const CONTENT_KEY: &str = "markdown-editor-content";
/// Store key for the info-panel dismissal flag (`"true"` when dismissed).
pub const PANEL_DISMISSED_KEY: &str = "seo-section-dismissed";

/// Storage access errors. Internal to the file store; callers only ever
/// see them as log lines.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Abstraction over persistent key-value storage.
///
/// The application depends only on this trait so tests can substitute an
/// in-memory store for the on-disk one.
pub trait StoragePort {
    /// Read the value for `key`. Returns `None` when the key is absent or
    /// the read fails for any reason.
    fn load(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`. Best effort; failures are swallowed
    /// after logging.
    fn save(&self, key: &str, value: &str);
}

/// Serialized shape of the store file: a single flat string map.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(flatten)]
    entries: HashMap<String, String>,
}

/// On-disk store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`. The file is created
    /// lazily on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the default per-user data location.
    pub fn open_default() -> Self {
        Self::new(default_storage_path())
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let file: StoreFile = serde_json::from_str(&content)?;
        Ok(file.entries)
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = StoreFile {
            entries: entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl StoragePort for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        match self.read_entries() {
            Ok(mut entries) => entries.remove(key),
            Err(err) => {
                tracing::warn!(key, %err, "storage read failed; continuing without snapshot");
                None
            }
        }
    }

    fn save(&self, key: &str, value: &str) {
        // Read-modify-write of the whole file. Other keys are preserved;
        // a read failure falls back to a fresh map so the write can still
        // land the current value.
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(key, %err, "storage read failed before save; rewriting store");
                HashMap::new()
            }
        };
        entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.write_entries(&entries) {
            tracing::warn!(key, %err, "storage write failed; snapshot not persisted");
        }
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::sync::Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

/// Default location of the store file, per platform.
pub fn default_storage_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mdpane").join("storage.json");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mdpane")
                .join("storage.json");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("mdpane").join("storage.json");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("mdpane")
                .join("storage.json");
        }
    }

    PathBuf::from("mdpane-storage.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_key_returns_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.load(CONTENT_KEY), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        store.save(CONTENT_KEY, "# Hello\n\nworld");
        assert_eq!(store.load(CONTENT_KEY), Some("# Hello\n\nworld".to_string()));
    }

    #[test]
    fn test_save_preserves_other_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        store.save(CONTENT_KEY, "content");
        store.save(PANEL_DISMISSED_KEY, "true");
        assert_eq!(store.load(CONTENT_KEY), Some("content".to_string()));
        assert_eq!(store.load(PANEL_DISMISSED_KEY), Some("true".to_string()));
    }

    #[test]
    fn test_corrupt_store_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json {").unwrap();
        let store = FileStore::new(&path);
        assert_eq!(store.load(CONTENT_KEY), None);

        // A save after corruption still lands the new value.
        store.save(CONTENT_KEY, "recovered");
        assert_eq!(store.load(CONTENT_KEY), Some("recovered".to_string()));
    }

    #[test]
    fn test_memory_store_round_trips() {
        let store = MemoryStore::new();
        store.save("k", "v");
        assert_eq!(store.load("k"), Some("v".to_string()));
        assert_eq!(store.load("missing"), None);
    }

    proptest::proptest! {
        #[test]
        fn prop_memory_store_round_trips_any_string(value in ".*") {
            let store = MemoryStore::new();
            store.save(CONTENT_KEY, &value);
            proptest::prop_assert_eq!(store.load(CONTENT_KEY), Some(value));
        }
    }
}
