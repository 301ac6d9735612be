//! Integration tests for CatalogClient using wiremock.

use std::time::Duration;

use storefront::{Attempts, RetryPolicy};
use storefront_catalog::{CatalogClient, CatalogConfig, CatalogError};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product_json(id: u64, title: &str, category: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "price": 9.99,
        "description": format!("{title} description"),
        "category": category,
        "image": format!("https://example.com/{id}.jpg"),
        "rating": { "rate": 4.2, "count": 51 }
    })
}

fn client_for(server: &MockServer) -> CatalogClient {
    let config = CatalogConfig {
        base_url: server.uri(),
        ..CatalogConfig::default()
    };
    CatalogClient::new(config).unwrap()
}

/// Two product listings inside the TTL window produce exactly one upstream call.
#[tokio::test]
async fn products_are_cached_within_ttl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            product_json(1, "Red Shirt", "clothing"),
            product_json(2, "Blue Hat", "accessories"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let first = client.products().await.unwrap();
    let second = client.products().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

/// Category listings are cached under per-category keys.
#[tokio::test]
async fn category_listings_are_cached_per_category() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/category/clothing"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([product_json(1, "Red Shirt", "clothing")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/category/jewelery"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([product_json(5, "Gold Ring", "jewelery")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let clothing = client.products_by_category("clothing").await.unwrap();
    let clothing_again = client.products_by_category("clothing").await.unwrap();
    let jewelery = client.products_by_category("jewelery").await.unwrap();
    assert_eq!(clothing, clothing_again);
    assert_eq!(clothing[0].id, 1);
    assert_eq!(jewelery[0].id, 5);
}

/// Category names are path-escaped on the wire.
#[tokio::test]
async fn category_segment_is_escaped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/products/category/.+$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([product_json(3, "Jacket", "men's clothing")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let products = client.products_by_category("men's clothing").await.unwrap();
    assert_eq!(products[0].id, 3);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/products/category/men's%20clothing");
}

/// Single-product lookups bypass the cache entirely.
#[tokio::test]
async fn product_by_id_always_hits_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json(7, "Green Sock", "clothing")),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let first = client.product_by_id(7).await.unwrap();
    let second = client.product_by_id(7).await.unwrap();
    assert_eq!(first, second);
}

/// The category list endpoint is cached like any other listing.
#[tokio::test]
async fn categories_are_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!(["electronics", "jewelery"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let first = client.categories().await.unwrap();
    let second = client.categories().await.unwrap();
    assert_eq!(first, vec!["electronics", "jewelery"]);
    assert_eq!(first, second);
}

/// A 5xx answer is a status error, not a transport error: the default
/// policy must not retry it, and it must not poison the cache.
#[tokio::test]
async fn server_error_is_not_retried_and_not_cached() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    {
        let _failing = Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount_as_scoped(&mock_server)
            .await;

        let err = client.products().await.unwrap_err();
        match err {
            CatalogError::Status { status, resource } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(resource, "products");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    // The failure was not cached: the same client consults the now-healthy
    // upstream instead of replaying the error or an empty entry.
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([product_json(1, "Red Shirt", "clothing")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let products = client.products().await.unwrap();
    assert_eq!(products.len(), 1);
}

/// A body that is not the expected shape surfaces as a decode error.
#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.products().await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode { .. }), "got {err:?}");
    assert!(!err.is_transient());
}

/// A connection that cannot be established classifies as transient.
#[tokio::test]
async fn connection_failure_is_transient() {
    // Grab a port that answered once, then stops existing.
    let dead_uri = {
        let mock_server = MockServer::start().await;
        mock_server.uri()
    };

    let config = CatalogConfig {
        base_url: dead_uri,
        retry: RetryPolicy {
            max_attempts: Attempts::new(2).unwrap(),
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        },
        ..CatalogConfig::default()
    };
    let client = CatalogClient::new(config).unwrap();

    let err = client.products().await.unwrap_err();
    assert!(err.is_transient(), "got {err:?}");
    assert!(matches!(err, CatalogError::Transport { .. }));
}

/// invalidate_all drops cached listings, forcing a refetch.
#[tokio::test]
async fn invalidate_all_forces_refetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([product_json(1, "Red Shirt", "clothing")])),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.products().await.unwrap();
    client.invalidate_all();
    client.products().await.unwrap();
}

/// Search reuses the cached full listing and filters it locally.
#[tokio::test]
async fn search_filters_the_cached_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            product_json(1, "Red Shirt", "clothing"),
            product_json(2, "Blue Hat", "accessories"),
            product_json(3, "Green Sock", "clothing"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let red = client.search("red").await.unwrap();
    assert_eq!(red.len(), 1);
    assert_eq!(red[0].id, 1);

    // Second search reuses the cached listing.
    let everything = client.search("").await.unwrap();
    assert_eq!(everything.len(), 3);
}

/// An unparsable base URL is rejected at construction.
#[tokio::test]
async fn invalid_base_url_is_a_config_error() {
    let config = CatalogConfig {
        base_url: "not a url".into(),
        ..CatalogConfig::default()
    };
    let err = CatalogClient::new(config).unwrap_err();
    assert!(matches!(err, CatalogError::Config(_)), "got {err:?}");
}
