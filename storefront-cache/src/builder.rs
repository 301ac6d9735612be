//! Builder for configuring [`TtlCache`].

use std::marker::PhantomData;
use std::time::Duration;

use crate::store::{DEFAULT_TTL, TtlCache};

/// Builder for creating and configuring a [`TtlCache`].
///
/// Both knobs are optional:
///
/// - `default_ttl` - entry lifetime used by [`TtlCache::insert`];
///   defaults to [`DEFAULT_TTL`] (five minutes).
/// - `max_entries` - optional bound on stored entries. Unset means
///   unbounded growth, the historical behavior; set, the cache evicts the
///   oldest inserted key when a new key would exceed the bound.
///
/// # Example
///
/// ```
/// use storefront_cache::TtlCache;
/// use std::time::Duration;
///
/// let cache: TtlCache<String> = TtlCache::builder()
///     .default_ttl(Duration::from_secs(30))
///     .max_entries(1_000)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TtlCacheBuilder<V> {
    default_ttl: Duration,
    max_entries: Option<usize>,
    _value: PhantomData<fn() -> V>,
}

impl<V: Clone> TtlCacheBuilder<V> {
    pub(crate) fn new() -> Self {
        TtlCacheBuilder {
            default_ttl: DEFAULT_TTL,
            max_entries: None,
            _value: PhantomData,
        }
    }

    /// Sets the TTL applied by [`TtlCache::insert`].
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Bounds the cache to at most `bound` entries, FIFO eviction.
    pub fn max_entries(mut self, bound: usize) -> Self {
        self.max_entries = Some(bound);
        self
    }

    /// Builds the cache.
    pub fn build(self) -> TtlCache<V> {
        TtlCache::from_builder(self.default_ttl, self.max_entries)
    }
}

impl<V: Clone> Default for TtlCacheBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
