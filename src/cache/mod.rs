// Dual-tier expiring cache for fetched datasets.
// The memory tier serves the hot path; a persistent store carries entries
// across runs. Persistent-tier failures downgrade to memory-only behavior
// and never reach the caller.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

pub mod entry;
pub mod paths;
pub mod store;

pub use entry::CacheEntry;
pub use store::{DisabledStore, DiskStore, PersistentStore};

/// Default TTL for cached datasets: 10 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Whether a `set` reached the persistent tier or degraded to memory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Both tiers hold the entry.
    Persisted,
    /// The persistent write failed; the entry lives in memory for this
    /// process only.
    MemoryOnly,
}

/// Expiring key/value store with a process-memory tier and a best-effort
/// persistent tier.
pub struct TimeBoxedCache {
    memory: HashMap<String, CacheEntry>,
    persistent: Box<dyn PersistentStore>,
}

impl TimeBoxedCache {
    pub fn new(persistent: Box<dyn PersistentStore>) -> Self {
        Self {
            memory: HashMap::new(),
            persistent,
        }
    }

    /// Cache backed by the platform cache directory, degrading to
    /// memory-only when none exists.
    pub fn with_default_store() -> Self {
        let persistent: Box<dyn PersistentStore> = match DiskStore::default_location() {
            Some(store) => Box::new(store),
            None => Box::new(DisabledStore),
        };
        Self::new(persistent)
    }

    /// Store `value` with the default TTL.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> WriteOutcome {
        self.set_with_ttl(key, value, DEFAULT_TTL)
    }

    /// Store `value` for `ttl`. The memory write always succeeds; the
    /// persistent mirror is best-effort and its failures are absorbed here.
    pub fn set_with_ttl<T: Serialize>(&mut self, key: &str, value: &T, ttl: Duration) -> WriteOutcome {
        let data = match serde_json::to_value(value) {
            Ok(data) => data,
            Err(err) => {
                warn!(key, %err, "cache entry is not serializable, dropping");
                return WriteOutcome::MemoryOnly;
            }
        };

        let entry = CacheEntry::new(data, ttl);
        let outcome = match self.persistent.store(key, &entry) {
            Ok(()) => WriteOutcome::Persisted,
            Err(err) => {
                warn!(key, %err, "persistent cache write failed");
                WriteOutcome::MemoryOnly
            }
        };
        self.memory.insert(key.to_string(), entry);
        outcome
    }

    /// Fetch the live value stored under `key`, or `None` once its TTL has
    /// elapsed.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let data = self.get_value(key)?;
        match serde_json::from_value(data) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, %err, "cached entry does not match the requested type");
                None
            }
        }
    }

    /// `true` when `get` would return a value; shares the same expiry path.
    pub fn has(&mut self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// Drop the memory tier and every persisted entry in this cache's
    /// namespace. Foreign files in the same directory are left alone.
    pub fn clear(&mut self) {
        self.memory.clear();
        if let Err(err) = self.persistent.clear_namespace() {
            warn!(%err, "failed to clear persistent cache namespace");
        }
    }

    fn get_value(&mut self, key: &str) -> Option<Value> {
        // Memory tier first; the hot path never touches the store.
        if let Some(entry) = self.memory.get(key) {
            if entry.is_live() {
                return Some(entry.data.clone());
            }
            self.memory.remove(key);
        }

        match self.persistent.load(key) {
            Ok(Some(entry)) if entry.is_live() => {
                // Promote so both tiers agree on liveness.
                let data = entry.data.clone();
                self.memory.insert(key.to_string(), entry);
                Some(data)
            }
            Ok(Some(_)) => {
                if let Err(err) = self.persistent.remove(key) {
                    warn!(key, %err, "failed to drop expired persistent entry");
                }
                None
            }
            Ok(None) => None,
            Err(err) => {
                warn!(key, %err, "persistent cache read failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        name: String,
        stars: u64,
    }

    fn payload() -> Payload {
        Payload {
            name: "folio".to_string(),
            stars: 42,
        }
    }

    fn disk_cache(temp_dir: &TempDir) -> TimeBoxedCache {
        TimeBoxedCache::new(Box::new(DiskStore::new(temp_dir.path().to_path_buf())))
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = disk_cache(&temp_dir);

        assert_eq!(cache.set("data", &payload()), WriteOutcome::Persisted);
        assert_eq!(cache.get::<Payload>("data"), Some(payload()));
        assert!(cache.has("data"));
    }

    #[test]
    fn test_default_ttl_applies() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = disk_cache(&temp_dir);

        cache.set("data", &payload());
        assert_eq!(cache.memory["data"].expiry, DEFAULT_TTL);
    }

    #[test]
    fn test_elapsed_ttl_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = disk_cache(&temp_dir);

        cache.set_with_ttl("data", &payload(), Duration::ZERO);
        assert_eq!(cache.get::<Payload>("data"), None);
        assert!(!cache.has("data"));
    }

    #[test]
    fn test_expired_memory_entry_is_evicted() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = disk_cache(&temp_dir);

        cache.set_with_ttl("data", &payload(), Duration::ZERO);
        cache.get::<Payload>("data");
        assert!(!cache.memory.contains_key("data"));
    }

    #[test]
    fn test_expired_persistent_entry_is_deleted() {
        let temp_dir = TempDir::new().unwrap();
        let store = DiskStore::new(temp_dir.path().to_path_buf());

        let mut entry = CacheEntry::new(json!(1), Duration::from_secs(60));
        entry.timestamp = chrono::Utc::now() - chrono::Duration::seconds(120);
        store.store("stale", &entry).unwrap();

        let mut cache = disk_cache(&temp_dir);
        assert_eq!(cache.get::<u64>("stale"), None);
        assert!(store.load("stale").unwrap().is_none());
    }

    #[test]
    fn test_restart_round_trip_promotes_from_disk() {
        let temp_dir = TempDir::new().unwrap();

        let mut first = disk_cache(&temp_dir);
        first.set("data", &payload());
        drop(first);

        // A fresh cache starts with an empty memory tier, like a new process.
        let mut second = disk_cache(&temp_dir);
        assert_eq!(second.get::<Payload>("data"), Some(payload()));
        assert!(second.memory.contains_key("data"));
    }

    #[test]
    fn test_clear_empties_namespace_and_spares_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = disk_cache(&temp_dir);

        cache.set("a", &payload());
        cache.set("b", &payload());

        let foreign = temp_dir.path().join("keep.json");
        fs::write(&foreign, "{}").unwrap();

        cache.clear();

        assert_eq!(cache.get::<Payload>("a"), None);
        assert_eq!(cache.get::<Payload>("b"), None);
        assert!(foreign.exists());
    }

    #[test]
    fn test_failed_persistent_write_degrades_to_memory() {
        let mut cache = TimeBoxedCache::new(Box::new(DisabledStore));

        assert_eq!(cache.set("data", &payload()), WriteOutcome::MemoryOnly);
        // The memory tier still serves the value.
        assert_eq!(cache.get::<Payload>("data"), Some(payload()));
    }

    #[test]
    fn test_corrupt_persistent_entry_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(paths::entry_file_name("bad"));
        fs::write(&path, "not json").unwrap();

        let mut cache = disk_cache(&temp_dir);
        assert_eq!(cache.get::<Payload>("bad"), None);
    }

    #[test]
    fn test_mismatched_type_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = disk_cache(&temp_dir);

        cache.set("data", &payload());
        assert_eq!(cache.get::<Vec<u64>>("data"), None);
    }

    #[test]
    fn test_later_set_supersedes_earlier() {
        let temp_dir = TempDir::new().unwrap();
        let mut cache = disk_cache(&temp_dir);

        cache.set("data", &payload());
        let updated = Payload {
            name: "folio".to_string(),
            stars: 43,
        };
        cache.set("data", &updated);
        assert_eq!(cache.get::<Payload>("data"), Some(updated));
    }
}
