//! # storefront-cart
//!
//! Cart state for the storefront, kept consistent across execution
//! contexts. Every mutation applies locally, persists the full state to a
//! durable [`CartStore`], then announces the new state on a [`SyncBus`];
//! every other synchronizer attached to the same bus replaces its own view
//! with the announced one. Conflict resolution is last-writer-wins:
//! concurrent mutations from two contexts race, and the later persist owns
//! the durable copy.
//!
//! ```no_run
//! use storefront_cart::{CartSync, MemoryStore, SyncBus};
//! # use storefront_core::Product;
//!
//! # async fn run(product: Product) -> Result<(), storefront_cart::CartError> {
//! let bus = SyncBus::new();
//! let cart = CartSync::attach(MemoryStore::new(), bus.clone()).await?;
//! cart.add(product).await?;
//! println!("cart total: {:.2}", cart.total());
//! # Ok(())
//! # }
//! ```

mod error;
mod state;
mod store;
mod sync;

pub use error::CartError;
pub use state::{CartItem, CartState};
pub use store::{CartStore, JsonFileStore, MemoryStore, STORAGE_KEY};
pub use sync::{CartSync, SyncBus};
