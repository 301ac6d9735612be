//! Two cart contexts converging over one sync bus.
//!
//! Run with:
//! ```sh
//! RUST_LOG=debug cargo run -p storefront-demos --example cart_sync
//! ```
//! Clones of one `MemoryStore` play the role of storage shared between
//! same-origin contexts; the bus plays the change-notification channel.

use storefront_cart::{CartSync, MemoryStore, SyncBus};
use storefront_core::{Product, Rating};

fn sample(id: u64, title: &str, price: f64) -> Product {
    Product {
        id,
        title: title.to_owned(),
        price,
        description: String::new(),
        category: "demo".into(),
        image: String::new(),
        rating: Rating {
            rate: 4.5,
            count: 12,
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let bus = SyncBus::new();
    let store = MemoryStore::new();

    let tab_a = CartSync::attach(store.clone(), bus.clone()).await?;
    let tab_b = CartSync::attach(store.clone(), bus.clone()).await?;
    let mut b_changes = tab_b.subscribe();

    tab_a.add(sample(1, "Red Shirt", 12.50)).await?;
    tab_a.add(sample(1, "Red Shirt", 12.50)).await?;
    tab_a.add(sample(2, "Blue Hat", 8.00)).await?;

    // Wait until tab B has applied tab A's latest snapshot.
    while tab_b.state() != tab_a.state() {
        b_changes.changed().await?;
    }

    println!("tab A total: {:.2}", tab_a.total());
    println!("tab B total: {:.2}", tab_b.total());
    for item in tab_b.state().items() {
        println!("  {}x #{} {}", item.quantity, item.id, item.product.title);
    }

    tab_b.update_quantity(1, 5).await?;
    println!("after tab B's update, tab A sees:");
    let mut a_changes = tab_a.subscribe();
    while tab_a.state() != tab_b.state() {
        a_changes.changed().await?;
    }
    for item in tab_a.state().items() {
        println!("  {}x #{} {}", item.quantity, item.id, item.product.title);
    }

    Ok(())
}
