//! # storefront
//!
//! The hub crate of the storefront data-access workspace. It provides the
//! generic retry executor and re-exports the core vocabulary, so most
//! applications depend on this crate plus the integration crate they need
//! (`storefront-catalog` for the product catalog, `storefront-cart` for
//! cart state).
//!
//! ## Retrying an operation
//!
//! ```no_run
//! use storefront::RetryPolicy;
//!
//! # #[derive(Debug)] struct Flaky;
//! # impl std::fmt::Display for Flaky {
//! #     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "flaky") }
//! # }
//! # async fn call_upstream() -> Result<String, Flaky> { Ok(String::new()) }
//! # async fn run() -> Result<(), Flaky> {
//! let policy = RetryPolicy::default();
//! let value = policy.run(|| call_upstream(), |_err| true).await?;
//! # Ok(())
//! # }
//! ```

/// Retry policy and executor.
///
/// Defines [`RetryPolicy`](retry::RetryPolicy): a bounded attempt count and
/// an exponential backoff schedule with additive jitter, applied to any
/// fallible asynchronous operation.
pub mod retry;

pub use retry::{Attempts, RetryPolicy};
pub use storefront_cache::{DEFAULT_TTL, TtlCache, TtlCacheBuilder};
pub use storefront_core::{CacheKey, CacheValue, KeyPart, Product, Rating};
