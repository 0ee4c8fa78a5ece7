//! In-memory TTL cache and on-disk cache locations.

use lru::LruCache;
use std::{
    hash::Hash,
    num::NonZeroUsize,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crate::error::{Result, ScoutError};

/// Directory for files this tool keeps between runs: `~/.cache/action-scout`.
pub fn app_cache_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("action-scout")
}

/// LRU cache whose entries expire a fixed time after insertion.
///
/// Clones share storage. Concurrent misses may both refetch; the last `put` wins.
pub struct TtlCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    entries: Arc<Mutex<LruCache<K, (Instant, V)>>>,
    ttl: Duration,
}

impl<K, V> Clone for TtlCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
            ttl,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, LruCache<K, (Instant, V)>>> {
        self.entries.lock().map_err(|e| ScoutError::Cache {
            message: e.to_string(),
        })
    }

    /// Fresh value for `key`, dropping it if it has expired.
    pub fn get(&self, key: &K) -> Result<Option<V>> {
        let mut entries = self.lock()?;
        let expired = match entries.get(key) {
            Some((stored, value)) if stored.elapsed() < self.ttl => return Ok(Some(value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        Ok(None)
    }

    pub fn put(&self, key: K, value: V) -> Result<()> {
        self.lock()?.put(key, (Instant::now(), value));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_cache_dir() {
        let path = app_cache_dir();
        assert!(path.to_string_lossy().ends_with("action-scout"));
    }

    #[test]
    fn test_put_and_get() {
        let cache: TtlCache<u16, Vec<u32>> = TtlCache::new(4, Duration::from_secs(60));
        cache.put(2025, vec![1, 2, 3]).unwrap();

        assert_eq!(cache.get(&2025).unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(cache.get(&2024).unwrap(), None);
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache: TtlCache<&str, u32> = TtlCache::new(4, Duration::ZERO);
        cache.put("roster", 7).unwrap();

        assert_eq!(cache.get(&"roster").unwrap(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_capacity() {
        let cache: TtlCache<u32, u32> = TtlCache::new(2, Duration::from_secs(60));
        cache.put(1, 1).unwrap();
        cache.put(2, 2).unwrap();
        cache.put(3, 3).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1).unwrap(), None);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache: TtlCache<u32, &str> = TtlCache::new(2, Duration::from_secs(60));
        let other = cache.clone();
        other.put(1, "shared").unwrap();
        assert_eq!(cache.get(&1).unwrap(), Some("shared"));
        assert_eq!(other.len(), 1);
    }
}
