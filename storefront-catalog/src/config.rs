use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront::RetryPolicy;
use storefront_cache::DEFAULT_TTL;

/// Default catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Configuration for a [`CatalogClient`](crate::CatalogClient).
///
/// Deserializes from application configuration; every field has a default,
/// so `{}` is a valid config. Durations accept human-readable strings
/// ("5m", "750ms").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the catalog API.
    pub base_url: String,
    /// How long cached catalog responses stay fresh.
    #[serde(with = "humantime_serde")]
    pub cache_ttl: Duration,
    /// Per-request timeout applied to the HTTP client. `None` leaves
    /// requests unbounded; the retry loop itself carries no deadline.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
    /// Backoff schedule for transient failures.
    pub retry: RetryPolicy,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: DEFAULT_BASE_URL.to_owned(),
            cache_ttl: DEFAULT_TTL,
            request_timeout: None,
            retry: RetryPolicy::default(),
        }
    }
}
