//! The catalog client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use storefront::RetryPolicy;
use storefront_cache::TtlCache;
use storefront_core::{CacheKey, KeyPart, Product};
use tracing::debug;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::search;

/// Cache keys, namespaced per operation and parameterized by category.
mod keys {
    use super::{CacheKey, KeyPart};

    const PREFIX: &str = "catalog";

    pub(super) fn products() -> CacheKey {
        CacheKey::single(PREFIX, "op", "products")
    }

    pub(super) fn categories() -> CacheKey {
        CacheKey::single(PREFIX, "op", "categories")
    }

    pub(super) fn products_by_category(category: &str) -> CacheKey {
        CacheKey::new(
            PREFIX,
            vec![
                KeyPart::new("op", Some("products")),
                KeyPart::new("category", Some(category)),
            ],
        )
    }
}

/// Payload stored in the shared response cache.
///
/// One enum per cached shape keeps a single cache instance serving every
/// operation; the key decides which variant lives underneath it.
#[derive(Debug, Clone)]
pub enum CatalogPayload {
    /// A product listing (full catalog or one category).
    Products(Vec<Product>),
    /// The category name list.
    Categories(Vec<String>),
}

/// Client for the product-catalog API.
///
/// Composes the workspace's TTL cache and retry executor around a
/// [`reqwest::Client`]. Listing operations are memoized; single-product
/// lookups always hit the network. All operations share one cache, so
/// [`invalidate_all`](CatalogClient::invalidate_all) empties every cached
/// listing at once.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    cache: Arc<TtlCache<CatalogPayload>>,
    retry: RetryPolicy,
    cache_ttl: Duration,
}

impl CatalogClient {
    /// Creates a client with a cache of its own.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let cache = Arc::new(TtlCache::builder().default_ttl(config.cache_ttl).build());
        Self::with_cache(config, cache)
    }

    /// Creates a client memoizing through a caller-owned cache.
    ///
    /// The composing application decides the cache's lifetime and may share
    /// it with other readers; tests pass a fresh instance for isolation.
    pub fn with_cache(
        config: CatalogConfig,
        cache: Arc<TtlCache<CatalogPayload>>,
    ) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&config.base_url).map_err(|err| {
            CatalogError::Config(format!("invalid base URL `{}`: {err}", config.base_url))
        })?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| CatalogError::Config(err.to_string()))?;
        Ok(CatalogClient {
            http,
            base_url,
            cache,
            retry: config.retry,
            cache_ttl: config.cache_ttl,
        })
    }

    /// Lists the full product catalog. Cached.
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        let key = keys::products();
        if let Some(CatalogPayload::Products(products)) = self.cache.get(&key) {
            return Ok(products);
        }
        let products: Vec<Product> = self.fetch_retried(&["products"]).await?;
        self.cache.insert_with_ttl(
            key,
            CatalogPayload::Products(products.clone()),
            self.cache_ttl,
        );
        Ok(products)
    }

    /// Lists the catalog's category names. Cached.
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let key = keys::categories();
        if let Some(CatalogPayload::Categories(categories)) = self.cache.get(&key) {
            return Ok(categories);
        }
        let categories: Vec<String> = self.fetch_retried(&["products", "categories"]).await?;
        self.cache.insert_with_ttl(
            key,
            CatalogPayload::Categories(categories.clone()),
            self.cache_ttl,
        );
        Ok(categories)
    }

    /// Lists the products of one category. Cached per category.
    pub async fn products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        let key = keys::products_by_category(category);
        if let Some(CatalogPayload::Products(products)) = self.cache.get(&key) {
            return Ok(products);
        }
        let products: Vec<Product> = self
            .fetch_retried(&["products", "category", category])
            .await?;
        self.cache.insert_with_ttl(
            key,
            CatalogPayload::Products(products.clone()),
            self.cache_ttl,
        );
        Ok(products)
    }

    /// Fetches one product by id.
    ///
    /// Never cached: single-item lookups are freshness-sensitive and rarely
    /// reused, so every call is a network round trip (still retried).
    pub async fn product_by_id(&self, id: u64) -> Result<Product, CatalogError> {
        let id_segment = id.to_string();
        self.fetch_retried(&["products", id_segment.as_str()]).await
    }

    /// Filters the (cached) full product list with [`search::filter_products`].
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let products = self.products().await?;
        Ok(search::filter_products(&products, query))
    }

    /// Drops every cached catalog response.
    ///
    /// For callers that know server-side data changed and want the next
    /// read to go to the network.
    pub fn invalidate_all(&self) {
        self.cache.clear();
        debug!("catalog cache invalidated");
    }

    /// Resolves path segments against the base URL, escaping each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<(Url, String), CatalogError> {
        let resource = segments.join("/");
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CatalogError::Config(format!(
                    "base URL `{}` cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok((url, resource))
    }

    /// Runs one GET under the retry policy.
    async fn fetch_retried<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, CatalogError> {
        let (url, resource) = self.endpoint(segments)?;
        self.retry
            .run(
                || self.fetch_json(url.clone(), &resource),
                CatalogError::is_transient,
            )
            .await
    }

    /// One GET against the catalog: require a 2xx, decode the JSON body.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: &str,
    ) -> Result<T, CatalogError> {
        debug!(resource, "fetching from catalog");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                resource: resource.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status,
                resource: resource.to_owned(),
            });
        }

        response.json().await.map_err(|source| CatalogError::Decode {
            resource: resource.to_owned(),
            source,
        })
    }
}
