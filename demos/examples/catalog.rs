//! Browse the live catalog through the cached, retrying client.
//!
//! Run with:
//! ```sh
//! RUST_LOG=debug cargo run -p storefront-demos --example catalog
//! ```
//! The second listing is served from the cache; watch the logs.

use std::time::Duration;

use storefront_catalog::{CatalogClient, CatalogConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = CatalogConfig {
        request_timeout: Some(Duration::from_secs(5)),
        ..CatalogConfig::default()
    };
    let client = CatalogClient::new(config)?;

    let categories = client.categories().await?;
    println!("categories: {categories:?}");

    let products = client.products().await?;
    println!("{} products in the catalog", products.len());

    // Served from the cache: no second network call.
    let again = client.products().await?;
    assert_eq!(products.len(), again.len());

    let shirts = client.search("shirt").await?;
    println!("{} products match \"shirt\":", shirts.len());
    for product in &shirts {
        println!("  #{} {} at {:.2}", product.id, product.title, product.price);
    }

    // Always fresh, never cached.
    let featured = client.product_by_id(1).await?;
    println!("featured: {} ({:.2})", featured.title, featured.price);

    Ok(())
}
