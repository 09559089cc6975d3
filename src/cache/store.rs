// Persistent tier for the cache.
// The store is injected into the cache behind a trait so tests can substitute
// doubles for the disk-backed implementation.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{FolioError, Result};

use super::entry::CacheEntry;
use super::paths;

/// Durable storage for cache entries, namespaced by
/// [`paths::NAMESPACE_PREFIX`].
pub trait PersistentStore {
    /// Load the entry persisted under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<CacheEntry>>;
    /// Persist `entry` under `key`, replacing any previous entry.
    fn store(&self, key: &str, entry: &CacheEntry) -> Result<()>;
    /// Remove the entry persisted under `key`, if any.
    fn remove(&self, key: &str) -> Result<()>;
    /// Remove every entry in this cache's namespace, leaving foreign files
    /// untouched.
    fn clear_namespace(&self) -> Result<()>;
}

/// Disk-backed store: one JSON file per key under the cache directory.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store rooted at the platform cache directory, when one exists.
    pub fn default_location() -> Option<Self> {
        paths::cache_dir().map(Self::new)
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(paths::entry_file_name(key))
    }
}

impl PersistentStore for DiskStore {
    fn load(&self, key: &str) -> Result<Option<CacheEntry>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let entry: CacheEntry = serde_json::from_str(&contents)?;
        Ok(Some(entry))
    }

    fn store(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        let json = serde_json::to_string(entry)?;

        // Write atomically via temp file
        let path = self.entry_path(key);
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn clear_namespace(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            // Nothing was ever persisted.
            Err(_) => return Ok(()),
        };
        for dir_entry in entries {
            let dir_entry = dir_entry?;
            let name = dir_entry.file_name();
            if name.to_string_lossy().starts_with(paths::NAMESPACE_PREFIX) {
                fs::remove_file(dir_entry.path())?;
            }
        }
        Ok(())
    }
}

/// Stand-in used when no cache directory exists. Reads find nothing and
/// writes report failure, so the cache downgrades to memory-only.
pub struct DisabledStore;

impl PersistentStore for DisabledStore {
    fn load(&self, _key: &str) -> Result<Option<CacheEntry>> {
        Ok(None)
    }

    fn store(&self, _key: &str, _entry: &CacheEntry) -> Result<()> {
        Err(FolioError::Other("persistent storage unavailable".into()))
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }

    fn clear_namespace(&self) -> Result<()> {
        Ok(())
    }
}
