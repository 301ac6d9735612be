//! Cached value wrapper with expiration metadata.
//!
//! [`CacheValue`] pairs a payload with the timestamp at which it stops being
//! valid. The store never hands out references into its own map; readers get
//! a clone of the payload, so a later eviction cannot invalidate anything a
//! caller is holding.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// A cached payload together with the instant it expires.
///
/// # Example
///
/// ```
/// use storefront_core::CacheValue;
/// use std::time::Duration;
///
/// let value = CacheValue::with_ttl(vec![1, 2, 3], Duration::from_secs(60));
/// assert!(!value.is_expired());
/// assert_eq!(value.data(), &vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheValue<T> {
    data: T,
    expires_at: DateTime<Utc>,
}

impl<T> CacheValue<T> {
    /// Creates a cache value expiring at the given instant.
    pub fn new(data: T, expires_at: DateTime<Utc>) -> Self {
        CacheValue { data, expires_at }
    }

    /// Creates a cache value expiring `ttl` from now.
    ///
    /// A `ttl` too large to represent saturates to the far future.
    pub fn with_ttl(data: T, ttl: Duration) -> Self {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        CacheValue { data, expires_at }
    }

    /// Returns a reference to the cached payload.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns when the payload expires.
    #[inline]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the payload's TTL has elapsed.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Remaining time-to-live, or `None` once expired.
    pub fn remaining_ttl(&self) -> Option<Duration> {
        let remaining = self.expires_at.signed_duration_since(Utc::now());
        if remaining.num_milliseconds() > 0 {
            Some(Duration::from_millis(remaining.num_milliseconds() as u64))
        } else {
            None
        }
    }

    /// Consumes the cache value and returns the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_value_is_not_expired() {
        let value = CacheValue::with_ttl("payload", Duration::from_secs(30));
        assert!(!value.is_expired());
        assert!(value.remaining_ttl().is_some());
    }

    #[test]
    fn past_expiry_is_expired() {
        let value = CacheValue::new("payload", Utc::now() - chrono::Duration::seconds(1));
        assert!(value.is_expired());
        assert_eq!(value.remaining_ttl(), None);
    }

    #[test]
    fn zero_ttl_expires_immediately() {
        let value = CacheValue::with_ttl("payload", Duration::ZERO);
        assert!(value.is_expired());
    }

    #[test]
    fn into_inner_returns_payload() {
        let value = CacheValue::with_ttl(vec![1u8, 2], Duration::from_secs(1));
        assert_eq!(value.into_inner(), vec![1, 2]);
    }
}
