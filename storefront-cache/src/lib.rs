#![warn(missing_docs)]
//! # storefront-cache
//!
//! A process-wide, in-memory TTL cache for catalog responses.
//!
//! Each entry carries its own expiry timestamp; expiration is enforced at
//! read time. A `get` that finds an expired entry evicts it and reports a
//! miss. There is no background sweep, and a hit never returns a value
//! whose TTL has elapsed.
//!
//! The cache is an explicitly constructed object, not a global: the
//! composing application decides its lifetime and hands it (usually inside
//! an `Arc`) to whoever memoizes through it. Tests get isolation by simply
//! building a fresh instance.
//!
//! ```
//! use storefront_cache::TtlCache;
//! use storefront_core::CacheKey;
//! use std::time::Duration;
//!
//! let cache: TtlCache<String> = TtlCache::builder()
//!     .default_ttl(Duration::from_secs(60))
//!     .build();
//! let key = CacheKey::single("catalog", "op", "categories");
//! cache.insert(key.clone(), "electronics".to_owned());
//! assert_eq!(cache.get(&key), Some("electronics".to_owned()));
//! ```

mod builder;
mod store;

pub use builder::TtlCacheBuilder;
pub use store::{DEFAULT_TTL, TtlCache};
