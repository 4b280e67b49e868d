use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, fmt::Debug, fs, path::PathBuf};

use crate::{ForecastError, Result};

/// Key/value store for parsed responses, with a per-entry lifetime.
pub trait CacheStore: Send + Sync + Debug {
    fn has(&self, key: &str) -> bool;

    /// Stored value, or `None` if missing or expired.
    fn get(&self, key: &str) -> Option<Value>;

    fn put(&self, key: &str, value: &Value, ttl_minutes: u32) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedEntry {
    expires_at: DateTime<Utc>,
    value: Value,
}

impl CachedEntry {
    fn new(value: &Value, ttl_minutes: u32) -> Self {
        Self {
            expires_at: Utc::now() + Duration::minutes(i64::from(ttl_minutes)),
            value: value.clone(),
        }
    }

    fn is_fresh(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

/// In-process cache. Entries vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CachedEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().values().filter(|e| e.is_fresh()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCache {
    fn has(&self, key: &str) -> bool {
        self.entries.lock().get(key).is_some_and(CachedEntry::is_fresh)
    }

    fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock();
        if entries.get(key).is_some_and(|e| !e.is_fresh()) {
            entries.remove(key);
        }
        entries.get(key).map(|e| e.value.clone())
    }

    fn put(&self, key: &str, value: &Value, ttl_minutes: u32) -> Result<()> {
        self.entries
            .lock()
            .insert(key.to_string(), CachedEntry::new(value, ttl_minutes));
        Ok(())
    }
}

/// Cache persisted as one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache under the platform cache directory.
    pub fn in_default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli").ok_or_else(|| {
            ForecastError::Cache("Could not determine platform cache directory".to_string())
        })?;
        Ok(Self::new(dirs.cache_dir().join("responses")))
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let name: String = key.bytes().map(|b| format!("{b:02x}")).collect();
        self.dir.join(format!("{name}.json"))
    }

    /// Fresh entry for `key`. Stale or unreadable files are removed.
    fn read_entry(&self, key: &str) -> Option<CachedEntry> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }

        let parsed = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str::<CachedEntry>(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(entry) if entry.is_fresh() => return Some(entry),
            Ok(_) => tracing::debug!("Evicting expired cache entry {}", path.display()),
            Err(e) => tracing::warn!("Evicting unreadable cache entry {}: {}", path.display(), e),
        }

        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!("Failed to remove cache entry {}: {}", path.display(), e);
        }
        None
    }
}

impl CacheStore for FileCache {
    fn has(&self, key: &str) -> bool {
        self.read_entry(key).is_some()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.read_entry(key).map(|e| e.value)
    }

    fn put(&self, key: &str, value: &Value, ttl_minutes: u32) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            ForecastError::Cache(format!(
                "Failed to create cache directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.entry_path(key);
        let text = serde_json::to_string(&CachedEntry::new(value, ttl_minutes))
            .map_err(|e| ForecastError::Cache(format!("Failed to serialize cache entry: {e}")))?;

        fs::write(&path, text).map_err(|e| {
            ForecastError::Cache(format!(
                "Failed to write cache entry {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_cache_roundtrip() {
        let cache = MemoryCache::new();
        assert!(!cache.has("k"));
        assert!(cache.get("k").is_none());

        cache.put("k", &json!({"a": 1}), 30).unwrap();
        assert!(cache.has("k"));
        assert_eq!(cache.get("k"), Some(json!({"a": 1})));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn memory_cache_zero_ttl_expires_immediately() {
        let cache = MemoryCache::new();
        cache.put("k", &json!(1), 0).unwrap();
        assert!(!cache.has("k"));
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn file_cache_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let key = "forecast|40.7|-74|2024-01-01T00:00:00|si";

        FileCache::new(dir.path()).put(key, &json!({"latitude": 40.7}), 30).unwrap();

        let reopened = FileCache::new(dir.path());
        assert!(reopened.has(key));
        assert_eq!(reopened.get(key), Some(json!({"latitude": 40.7})));
        assert!(!reopened.has("other"));
    }

    #[test]
    fn file_cache_expired_and_corrupt_entries_are_misses() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("nested"));

        cache.put("old", &json!(1), 0).unwrap();
        assert!(!cache.has("old"));
        assert!(cache.get("old").is_none());

        fs::write(cache.entry_path("bad"), "not json").unwrap();
        assert!(!cache.has("bad"));
        assert!(cache.get("bad").is_none());
    }

    #[test]
    fn file_cache_removes_expired_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());

        let keys: Vec<String> = (0..5).map(|i| format!("forecast|{i}|0||")).collect();
        for key in &keys {
            cache.put(key, &json!({"latitude": 1.0}), 0).unwrap();
        }
        fs::write(cache.entry_path("bad"), "not json").unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 6);

        for key in &keys[..3] {
            assert!(!cache.has(key));
        }
        for key in &keys[3..] {
            assert!(cache.get(key).is_none());
        }
        assert!(cache.get("bad").is_none());

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn file_cache_keeps_fresh_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());

        cache.put("fresh", &json!(1), 30).unwrap();
        assert!(cache.has("fresh"));
        assert_eq!(cache.get("fresh"), Some(json!(1)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
