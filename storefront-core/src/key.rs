//! Cache key types and construction.
//!
//! A [`CacheKey`] names one cached catalog response. Keys are namespaced by
//! a prefix (one per data source) and parameterized by a list of
//! [`KeyPart`]s, so `products` for one category can never collide with
//! `products` for another.
//!
//! ## Format
//!
//! Rendered with `Display`, keys follow the format
//! `{prefix}:key1=value1&key2=value2`. Part values are URL-escaped when
//! rendered, so a category like `men's clothing` cannot smuggle a `&` or
//! `=` into the key and alias another entry:
//!
//! ```
//! use storefront_core::{CacheKey, KeyPart};
//!
//! let key = CacheKey::new(
//!     "catalog",
//!     vec![
//!         KeyPart::new("op", Some("products")),
//!         KeyPart::new("category", Some("men's clothing")),
//!     ],
//! );
//! assert_eq!(key.to_string(), "catalog:op=products&category=men%27s+clothing");
//! ```
//!
//! ## Cheap cloning
//!
//! `CacheKey` wraps its data in an [`Arc`], so cloning a key only bumps a
//! reference count. Keys are cloned on every cache insert, which makes this
//! worth having.
//!
//! [`KeyPart`] uses [`SmolStr`], which stores short strings (≤23 bytes)
//! inline without a heap allocation; nearly every part this workspace
//! produces fits.

use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A single `key=value` component of a [`CacheKey`].
///
/// The value is optional; a part without a value renders as a bare flag.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct KeyPart {
    key: SmolStr,
    value: Option<SmolStr>,
}

impl KeyPart {
    /// Creates a new key part.
    pub fn new(key: impl Into<SmolStr>, value: Option<impl Into<SmolStr>>) -> Self {
        KeyPart {
            key: key.into(),
            value: value.map(Into::into),
        }
    }

    /// Returns the part name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the part value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => {
                let pair = serde_urlencoded::to_string([(self.key.as_str(), value.as_str())])
                    .map_err(|_| fmt::Error)?;
                f.write_str(&pair)
            }
            None => f.write_str(&self.key),
        }
    }
}

/// Inner structure containing the actual cache key data.
/// Wrapped in Arc for cheap cloning.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct CacheKeyInner {
    prefix: SmolStr,
    parts: Vec<KeyPart>,
}

/// A namespaced cache key identifying one cached entry.
///
/// # Example
///
/// ```
/// use storefront_core::{CacheKey, KeyPart};
///
/// let key = CacheKey::single("catalog", "op", "categories");
/// assert_eq!(key.prefix(), "catalog");
/// assert_eq!(key.to_string(), "catalog:op=categories");
/// ```
#[derive(Clone, Debug)]
pub struct CacheKey {
    inner: Arc<CacheKeyInner>,
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same Arc pointer
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl CacheKey {
    /// Creates a new cache key with the given prefix and parts.
    pub fn new(prefix: impl Into<SmolStr>, parts: Vec<KeyPart>) -> Self {
        CacheKey {
            inner: Arc::new(CacheKeyInner {
                prefix: prefix.into(),
                parts,
            }),
        }
    }

    /// Creates a cache key with a single key-value part.
    pub fn single(
        prefix: impl Into<SmolStr>,
        key: impl Into<SmolStr>,
        value: impl Into<SmolStr>,
    ) -> Self {
        Self::new(prefix, vec![KeyPart::new(key, Some(value))])
    }

    /// Returns the cache key prefix.
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// Returns an iterator over the key parts.
    pub fn parts(&self) -> impl Iterator<Item = &KeyPart> {
        self.inner.parts.iter()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.inner.prefix.is_empty() {
            write!(f, "{}:", self.inner.prefix)?;
        }
        for (i, part) in self.inner.parts.iter().enumerate() {
            if i > 0 {
                write!(f, "&")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_prefix_and_parts() {
        let key = CacheKey::new(
            "catalog",
            vec![
                KeyPart::new("op", Some("products")),
                KeyPart::new("category", Some("electronics")),
            ],
        );
        assert_eq!(key.to_string(), "catalog:op=products&category=electronics");
    }

    #[test]
    fn display_escapes_part_values() {
        let key = CacheKey::single("catalog", "category", "a&b=c");
        assert_eq!(key.to_string(), "catalog:category=a%26b%3Dc");
    }

    #[test]
    fn escaped_values_cannot_alias_distinct_keys() {
        let tricky = CacheKey::new(
            "catalog",
            vec![KeyPart::new("category", Some("x&op=products"))],
        );
        let plain = CacheKey::new(
            "catalog",
            vec![
                KeyPart::new("category", Some("x")),
                KeyPart::new("op", Some("products")),
            ],
        );
        assert_ne!(tricky, plain);
        assert_ne!(tricky.to_string(), plain.to_string());
    }

    #[test]
    fn flag_part_renders_without_value() {
        let key = CacheKey::new("catalog", vec![KeyPart::new("fresh", None::<&str>)]);
        assert_eq!(key.to_string(), "catalog:fresh");
    }

    #[test]
    fn equality_ignores_arc_identity() {
        let a = CacheKey::single("catalog", "op", "products");
        let b = CacheKey::single("catalog", "op", "products");
        assert_eq!(a, b);
        assert_eq!(a, a.clone());
    }
}
