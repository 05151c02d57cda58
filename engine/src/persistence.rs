//! # Persistence Adapter
//!
//! Best-effort durability for the active theme id. The adapter stores exactly
//! one string, the id of the active theme, under [`STORAGE_KEY`] in a
//! client-side key/value store.
//!
//! Storage is never allowed to break a theme switch: every failure is logged
//! and swallowed here. A stored value that no longer names a catalog theme is
//! treated as absent, which protects against catalog changes between sessions.
//!
//! ## Stores
//!
//! - [`MemoryStorage`] - shared in-process map, for embedding and tests
//! - [`FileStorage`] - JSON object file in the user's config directory
//! - no store at all ([`PersistenceAdapter::unavailable`]) - loads yield
//!   `None` and writes are skipped, as in a context without client storage

use crate::catalog::ThemeCatalog;
use crate::errors::StorageError;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Fixed key the active theme id is stored under.
pub const STORAGE_KEY: &str = "portfolio-theme";

/// A durable string key/value store.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<R>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> R,
    ) -> Result<R, StorageError> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| StorageError::Unavailable(format!("storage lock poisoned: {e}")))?;
        Ok(f(&mut items))
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_items(|items| items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_items(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.with_items(|items| {
            items.remove(key);
        })
    }
}

/// Store backed by a single JSON object file.
///
/// Every write rewrites the whole document through a temporary file and a
/// rename, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/<app_name>/storage.json`, if the platform has a config dir.
    pub fn in_config_dir(app_name: &str) -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(app_name).join("storage.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current contents as the base for a write, and whether the document on
    /// disk was corrupt. A corrupt document is replaced rather than blocking
    /// every later write.
    fn read_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.read_all() {
            Ok(items) => Ok((items, false)),
            Err(StorageError::Corrupt(reason)) => {
                log::warn!(
                    "Discarding corrupt storage file {}: {reason}",
                    self.path.display()
                );
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let (mut items, _) = self.read_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let (mut items, replaced) = self.read_for_write()?;
        if items.remove(key).is_some() || replaced {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// Reads and writes the active theme id, tolerating any storage failure.
#[derive(Clone)]
pub struct PersistenceAdapter {
    store: Option<Arc<dyn KeyValueStore>>,
    catalog: Arc<ThemeCatalog>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(store: Arc<dyn KeyValueStore>, catalog: Arc<ThemeCatalog>) -> Self {
        Self {
            store: Some(store),
            catalog,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Adapter for a context with no client storage.
    pub fn unavailable(catalog: Arc<ThemeCatalog>) -> Self {
        Self {
            store: None,
            catalog,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Override the storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Write `id`. Returns whether the value reached the store.
    pub fn save(&self, id: &str) -> bool {
        let Some(store) = &self.store else {
            log::debug!("No storage available, theme '{id}' not persisted");
            return false;
        };

        match store.set_item(&self.key, id) {
            Ok(()) => {
                log::debug!("Persisted theme '{id}'");
                true
            }
            Err(e) => {
                log::warn!("Failed to save theme: {e}");
                false
            }
        }
    }

    /// The stored id, if present, readable and still in the catalog.
    pub fn load(&self) -> Option<String> {
        let store = self.store.as_ref()?;

        let saved = match store.get_item(&self.key) {
            Ok(saved) => saved?,
            Err(e) => {
                log::warn!("Failed to load theme: {e}");
                return None;
            }
        };

        if self.catalog.contains(&saved) {
            Some(saved)
        } else {
            log::warn!("Ignoring persisted theme '{saved}': not in catalog");
            None
        }
    }

    /// Remove the stored value. Returns whether the store acknowledged it.
    pub fn clear(&self) -> bool {
        let Some(store) = &self.store else {
            return false;
        };

        match store.remove_item(&self.key) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to clear theme: {e}");
                false
            }
        }
    }
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("available", &self.store.is_some())
            .field("key", &self.key)
            .finish()
    }
}
