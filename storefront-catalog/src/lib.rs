//! # storefront-catalog
//!
//! Read operations over the remote product catalog, composed from the
//! workspace's TTL cache and retry executor. Every cached operation runs
//! the same pipeline: cache lookup, then on a miss a retried network fetch
//! whose result is stored before returning. Failures are never cached, and
//! errors reach the caller unwrapped; user-visible messaging is the view
//! layer's job.
//!
//! ```no_run
//! use storefront_catalog::{CatalogClient, CatalogConfig};
//!
//! # async fn run() -> Result<(), storefront_catalog::CatalogError> {
//! let client = CatalogClient::new(CatalogConfig::default())?;
//! let products = client.products().await?;
//! let hats = client.search("hat").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
pub mod search;

pub use client::{CatalogClient, CatalogPayload};
pub use config::CatalogConfig;
pub use error::CatalogError;
