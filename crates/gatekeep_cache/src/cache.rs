//! TTL cache with a capacity bound and LRU eviction.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::Duration;
use tokio::time::Instant;

/// Cache entry with value and absolute expiry.
///
/// An entry is visible to readers only while `now < expires_at`.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Check if this entry is expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Check if this entry is expired at a given instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.expires_at.checked_duration_since(Instant::now())
    }

    /// Consume the entry, returning its value.
    pub fn into_value(self) -> V {
        self.value
    }
}

/// Configuration for a TTL cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct CacheConfig {
    /// Time-to-live for cached entries (seconds)
    #[serde(default = "default_ttl_secs")]
    #[builder(default = "default_ttl_secs()")]
    ttl_secs: u64,

    /// Maximum number of live entries
    #[serde(default = "default_capacity")]
    #[builder(default = "default_capacity()")]
    capacity: usize,
}

fn default_ttl_secs() -> u64 {
    20 * 60
}

fn default_capacity() -> usize {
    512
}

impl CacheConfig {
    /// Create a configuration.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl_secs: ttl.as_secs(),
            capacity,
        }
    }

    /// TTL as a duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            capacity: default_capacity(),
        }
    }
}

/// Map with per-entry expiry, bounded size and least-recently-used eviction.
///
/// Expiry is checked lazily on access; [`TtlCache::cleanup_expired`] purges
/// eagerly. The cache itself is not synchronized: owners wrap it in a lock.
///
/// # Example
///
/// ```
/// use gatekeep_cache::{CacheConfig, TtlCache};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut cache = TtlCache::new(CacheConfig::new(Duration::from_secs(60), 2));
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// cache.get(&"a");
/// cache.insert("c", 3);
///
/// // "b" was least recently used
/// assert!(cache.get(&"b").is_none());
/// assert_eq!(cache.get(&"a"), Some(&1));
/// # }
/// ```
#[derive(Debug)]
pub struct TtlCache<K, V> {
    config: CacheConfig,
    entries: HashMap<K, CacheEntry<V>>,
    access_order: VecDeque<K>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    /// Create a new cache with configuration.
    pub fn new(config: CacheConfig) -> Self {
        tracing::debug!(
            ttl_secs = config.ttl_secs,
            capacity = config.capacity,
            "Creating new TtlCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            access_order: VecDeque::new(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Insert a value, replacing any previous entry for the key.
    ///
    /// If the cache is full, expired entries are purged first; if it is still
    /// full, the least recently used entry is evicted.
    pub fn insert(&mut self, key: K, value: V) {
        if self.config.capacity == 0 {
            tracing::debug!("Cache capacity is zero, skipping insert");
            return;
        }

        let now = Instant::now();
        let entry = CacheEntry {
            value,
            expires_at: now + self.config.ttl(),
        };

        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.capacity {
            self.purge_expired_at(now);
            if self.entries.len() >= self.config.capacity {
                self.evict_lru();
            }
        }

        self.touch(&key);
        let replaced = self.entries.insert(key, entry).is_some();
        tracing::debug!(replaced, size = self.entries.len(), "Inserted entry into cache");
    }

    /// Get a live value, marking it most recently used.
    ///
    /// Expired entries are removed and reported as absent.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let expired = self.entries.get(key)?.is_expired();
        if expired {
            tracing::debug!(?key, "Cache entry expired, removing");
            self.entries.remove(key);
            self.forget(key);
            return None;
        }

        self.touch(key);
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Remove an entry, returning its value if it was still live.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.forget(key);
        if entry.is_expired() {
            tracing::debug!(?key, "Removed entry had already expired");
            return None;
        }
        Some(entry.into_value())
    }

    /// Remove and return the raw entry, expired or not.
    ///
    /// Lets callers tell "never stored" apart from "stored but expired".
    pub fn take(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.forget(key);
        Some(entry)
    }

    /// Whether a live entry exists, without touching LRU order.
    pub fn contains(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    /// Remove expired entries from cache.
    pub fn cleanup_expired(&mut self) -> usize {
        let removed = self.purge_expired_at(Instant::now());
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = self.entries.len(),
                "Cleaned up expired cache entries"
            );
        }
        removed
    }

    /// Clear all cache entries.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.access_order.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let entries = &self.entries;
        self.access_order.retain(|key| entries.contains_key(key));
        before - self.entries.len()
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self.access_order.pop_front() {
            tracing::debug!(?key, "Evicting LRU entry");
            self.entries.remove(&key);
        }
    }

    fn touch(&mut self, key: &K) {
        self.forget(key);
        self.access_order.push_back(key.clone());
    }

    fn forget(&mut self, key: &K) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_cache(capacity: usize) -> TtlCache<u32, &'static str> {
        TtlCache::new(CacheConfig::new(Duration::from_secs(10), capacity))
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_and_get() {
        let mut cache = small_cache(4);
        cache.insert(1, "one");
        assert_eq!(cache.get(&1), Some(&"one"));
        assert!(cache.get(&2).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_at_ttl_boundary() {
        let mut cache = small_cache(4);
        cache.insert(1, "one");

        tokio::time::advance(Duration::from_millis(9_999)).await;
        assert_eq!(cache.get(&1), Some(&"one"));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(cache.get(&1).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lru_eviction_respects_access() {
        let mut cache = small_cache(2);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.get(&1);
        cache.insert(3, "three");

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_cache_prefers_purging_expired() {
        let mut cache = TtlCache::new(CacheConfig::new(Duration::from_secs(10), 2));
        cache.insert(1, "one");
        tokio::time::advance(Duration::from_secs(5)).await;
        cache.insert(2, "two");
        tokio::time::advance(Duration::from_secs(6)).await;

        // 1 is expired, 2 is live: inserting 3 drops 1 and keeps 2
        cache.insert(3, "three");
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_does_not_evict() {
        let mut cache = small_cache(2);
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.insert(1, "uno");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some(&"uno"));
        assert_eq!(cache.get(&2), Some(&"two"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_expired_returns_none() {
        let mut cache = small_cache(2);
        cache.insert(1, "one");
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(cache.remove(&1).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_expired() {
        let mut cache = small_cache(4);
        cache.insert(1, "one");
        cache.insert(2, "two");
        tokio::time::advance(Duration::from_secs(11)).await;
        cache.insert(3, "three");

        assert_eq!(cache.cleanup_expired(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(*config.ttl_secs(), 1200);
        assert_eq!(*config.capacity(), 512);

        let built = CacheConfigBuilder::default().capacity(8usize).build().unwrap();
        assert_eq!(*built.ttl_secs(), 1200);
        assert_eq!(*built.capacity(), 8);
    }
}
