//! Durable client-side preferences
//!
//! A tiny key/value port used to persist the history sort preference across
//! runs. [`FilePreferenceStore`] is the real backend; [`MemoryPreferenceStore`]
//! backs tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fs2::FileExt;
use mockview_core::prelude::*;

/// Key holding the persisted [`SortField`](mockview_core::SortField)
pub const SORT_FIELD_KEY: &str = "history.order.by.entry.field";

/// Key holding the persisted [`SortOrder`](mockview_core::SortOrder)
pub const SORT_ORDER_KEY: &str = "history.order.by.date";

const PREFERENCES_FILENAME: &str = "preferences.toml";

/// Get/set access to durable string preferences.
pub trait PreferenceStore: Send {
    /// Read a value, `None` when the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value. Visible to every later `get`, including from a fresh
    /// store over the same backing storage.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────
// File backend
// ─────────────────────────────────────────────────────────────────

/// Preferences kept as a flat `key = "value"` TOML table.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data local dir>/mockview/preferences.toml`
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mockview")
            .join(PREFERENCES_FILENAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read preferences {:?}: {}", self.path, e);
                return BTreeMap::new();
            }
        };

        match toml::from_str(&content) {
            Ok(table) => table,
            Err(e) => {
                warn!("Ignoring malformed preferences {:?}: {}", self.path, e);
                BTreeMap::new()
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_table().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| Error::preferences("Preferences path has no parent directory"))?;
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::preferences(format!("Failed to create {:?}: {}", dir, e)))?;

        // The exclusive lock spans the whole read-modify-write
        let lock_path = dir.join(".preferences.lock");
        let lock = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| Error::preferences(format!("Failed to open lock file: {}", e)))?;
        lock.lock_exclusive()
            .map_err(|e| Error::preferences(format!("Failed to lock preferences: {}", e)))?;

        let mut table = self.read_table();
        table.insert(key.to_string(), value.to_string());

        let content = toml::to_string(&table)
            .map_err(|e| Error::preferences(format!("Failed to serialize preferences: {}", e)))?;

        let temp_path = dir.join(".preferences.toml.tmp");
        std::fs::write(&temp_path, content)
            .map_err(|e| Error::preferences(format!("Failed to write temp file: {}", e)))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| Error::preferences(format!("Failed to rename temp file: {}", e)))?;

        debug!("Saved preference {} = {}", key, value);
        // Lock is released when `lock` is dropped
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// In-memory backend
// ─────────────────────────────────────────────────────────────────

/// Preferences held in memory. Clones share the same storage, so a clone
/// behaves like a second store opened over the same file.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| Error::preferences("Preference store poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
