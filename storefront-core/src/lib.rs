#![warn(missing_docs)]
//! # storefront-core
//!
//! Core types shared by the storefront data-access crates.
//!
//! This crate defines the vocabulary the rest of the workspace speaks:
//!
//! - [`Product`] and [`Rating`] - immutable catalog values, identified by
//!   their numeric id
//! - [`CacheKey`] and [`KeyPart`] - namespaced, collision-safe cache keys
//! - [`CacheValue`] - a cached payload paired with its expiry timestamp
//!
//! It deliberately contains no I/O: storage lives in `storefront-cache`,
//! network access in `storefront-catalog`, and cart persistence in
//! `storefront-cart`.

pub mod key;
pub mod product;
pub mod value;

pub use key::{CacheKey, KeyPart};
pub use product::{Product, Rating};
pub use value::CacheValue;
