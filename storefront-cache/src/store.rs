//! The TTL cache store.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use dashmap::DashMap;
use storefront_core::{CacheKey, CacheValue};
use tracing::debug;

/// Default entry lifetime: five minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// An in-memory key-value cache with per-entry expiration.
///
/// Values are cloned out on read: callers never hold a reference into the
/// cache's own storage, so `V` is usually something cheap to clone (an
/// `Arc`, or a payload enum wrapping one).
///
/// Eviction is lazy: an expired entry stays in the map until a `get`
/// touches it, at which point it is removed as a side effect of the miss.
/// With an entry bound configured (see
/// [`TtlCacheBuilder::max_entries`](crate::TtlCacheBuilder::max_entries)),
/// inserting a new key at capacity additionally evicts the oldest inserted
/// key, FIFO order. TTL semantics are identical with and without the bound.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: DashMap<CacheKey, CacheValue<V>>,
    /// Insertion order, maintained only when an entry bound is configured.
    order: Mutex<VecDeque<CacheKey>>,
    default_ttl: Duration,
    max_entries: Option<usize>,
}

impl<V: Clone> TtlCache<V> {
    /// Starts building a cache. See [`TtlCacheBuilder`](crate::TtlCacheBuilder).
    pub fn builder() -> crate::TtlCacheBuilder<V> {
        crate::TtlCacheBuilder::new()
    }

    pub(crate) fn from_builder(default_ttl: Duration, max_entries: Option<usize>) -> Self {
        TtlCache {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            default_ttl,
            max_entries,
        }
    }

    /// Stores `value` under `key` with the cache's default TTL, overwriting
    /// any existing entry.
    pub fn insert(&self, key: CacheKey, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Overwriting an existing key refreshes both its expiry and, when an
    /// entry bound is configured, its FIFO position.
    pub fn insert_with_ttl(&self, key: CacheKey, value: V, ttl: Duration) {
        let value = CacheValue::with_ttl(value, ttl);
        match self.max_entries {
            None => {
                self.entries.insert(key, value);
            }
            Some(bound) => {
                // The order queue must stay consistent with the map, so the
                // whole bounded insert runs under the queue lock.
                let mut order = self.order.lock().expect("cache order lock poisoned");
                if self.entries.insert(key.clone(), value).is_some() {
                    order.retain(|queued| queued != &key);
                }
                order.push_back(key);
                while self.entries.len() > bound {
                    // Skip queue entries whose key has already been removed
                    // or lazily evicted.
                    let Some(oldest) = order.pop_front() else {
                        break;
                    };
                    if self.entries.remove(&oldest).is_some() {
                        debug!(key = %oldest, "entry bound reached, evicting oldest");
                    }
                }
            }
        }
    }

    /// Returns a copy of the live value under `key`, if any.
    ///
    /// Finding an expired entry evicts it and returns `None`; a hit never
    /// returns data past its TTL.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.value().is_expired() {
                debug!(%key, "cache hit");
                return Some(entry.value().data().clone());
            }
        } else {
            debug!(%key, "cache miss");
            return None;
        }
        // Expired: evict on the way out. `remove_if` re-checks so a value
        // overwritten between our read and this call survives.
        self.entries.remove_if(key, |_, value| value.is_expired());
        debug!(%key, "cache entry expired, evicted");
        None
    }

    /// Removes the entry under `key`, expired or not.
    pub fn remove(&self, key: &CacheKey) {
        self.entries.remove(key);
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.clear();
        self.order.lock().expect("cache order lock poisoned").clear();
        debug!("cache cleared");
    }

    /// Number of stored entries, counting expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache currently stores nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::builder().build()
    }
}
