//! The cart synchronizer.

use std::sync::Arc;

use storefront_core::Product;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::CartError;
use crate::state::CartState;
use crate::store::CartStore;

const SYNC_CHANNEL_CAPACITY: usize = 16;

/// The channel cart snapshots travel on between contexts.
///
/// Every synchronizer attached to a clone of the same bus hears every
/// announced snapshot, the in-process analogue of storage-change
/// notifications between same-origin tabs. Snapshots replace receiver
/// state wholesale; the bus carries no deltas and does no merging.
#[derive(Debug, Clone)]
pub struct SyncBus {
    tx: broadcast::Sender<CartState>,
}

impl SyncBus {
    /// Creates a bus with the default buffer.
    pub fn new() -> Self {
        Self::with_capacity(SYNC_CHANNEL_CAPACITY)
    }

    /// Creates a bus buffering up to `capacity` in-flight snapshots per
    /// receiver. A receiver that falls further behind skips to the newest
    /// snapshot, which last-writer-wins makes harmless.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        SyncBus { tx }
    }

    /// Announces a snapshot to every attached synchronizer.
    pub fn publish(&self, state: CartState) -> Result<(), CartError> {
        self.tx
            .send(state)
            .map(|_receivers| ())
            .map_err(|_| CartError::ChannelClosed)
    }

    fn subscribe(&self) -> broadcast::Receiver<CartState> {
        self.tx.subscribe()
    }
}

impl Default for SyncBus {
    fn default() -> Self {
        Self::new()
    }
}

struct Inner {
    store: Arc<dyn CartStore>,
    bus: SyncBus,
    /// Holds the current state; doubles as the same-context change feed.
    current: Arc<watch::Sender<CartState>>,
    /// Serializes mutations within this context across their await points.
    mutating: Mutex<()>,
    listener: JoinHandle<()>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// One context's view of the cart.
///
/// Cheap to clone; clones share the same state. Each mutation runs
/// apply, persist, announce: the local view updates first, the durable
/// store gets the full document, and only a successful save is announced
/// to other contexts. A failed save surfaces as
/// [`CartError::Storage`](crate::CartError::Storage) and is not rolled
/// back locally; there is no cross-operation transaction.
///
/// Incoming snapshots from the bus replace local state unconditionally
/// (last-writer-wins). [`subscribe`](CartSync::subscribe) delivers every
/// applied state to same-context observers, whether the change was local
/// or remote, so the mutating context reacts through the same path as
/// everyone else.
#[derive(Clone)]
pub struct CartSync {
    inner: Arc<Inner>,
}

impl CartSync {
    /// Attaches a synchronizer to a store and a bus.
    ///
    /// Hydrates from the store (an absent document means an empty cart)
    /// and starts listening for snapshots from other contexts.
    pub async fn attach(store: impl CartStore, bus: SyncBus) -> Result<Self, CartError> {
        let store: Arc<dyn CartStore> = Arc::new(store);
        let initial = store.load().await?.unwrap_or_default();
        debug!(items = initial.len(), "cart hydrated from storage");

        let (current, _) = watch::channel(initial);
        let current = Arc::new(current);

        let mut rx = bus.subscribe();
        let listener_view = Arc::clone(&current);
        let listener = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(state) => {
                        // Unconditional replace: last writer wins, no merge.
                        listener_view.send_replace(state);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "cart sync receiver lagged, skipping to newest snapshot");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Ok(CartSync {
            inner: Arc::new(Inner {
                store,
                bus,
                current,
                mutating: Mutex::new(()),
                listener,
            }),
        })
    }

    /// A copy of the current cart state.
    pub fn state(&self) -> CartState {
        self.inner.current.borrow().clone()
    }

    /// Current cart total.
    pub fn total(&self) -> f64 {
        self.inner.current.borrow().total()
    }

    /// Watches every state change applied in this context, local or remote.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.current.subscribe()
    }

    /// Adds one unit of `product` to the cart.
    pub async fn add(&self, product: Product) -> Result<(), CartError> {
        debug!(product_id = product.id, "adding product to cart");
        self.commit(|state| state.add(product)).await
    }

    /// Removes the line with `product_id`, if present.
    pub async fn remove(&self, product_id: u64) -> Result<(), CartError> {
        debug!(product_id, "removing product from cart");
        self.commit(|state| state.remove(product_id)).await
    }

    /// Sets the quantity of an existing line.
    ///
    /// Quantities below 1 are rejected as a no-op: nothing is applied,
    /// persisted, or announced. Removal goes through
    /// [`remove`](CartSync::remove).
    pub async fn update_quantity(&self, product_id: u64, quantity: u32) -> Result<(), CartError> {
        if quantity < 1 {
            debug!(product_id, quantity, "rejected quantity update below 1");
            return Ok(());
        }
        self.commit(|state| state.set_quantity(product_id, quantity))
            .await
    }

    /// Empties the cart.
    pub async fn clear(&self) -> Result<(), CartError> {
        debug!("clearing cart");
        self.commit(|state| state.clear()).await
    }

    async fn commit(&self, mutate: impl FnOnce(&mut CartState)) -> Result<(), CartError> {
        let _guard = self.inner.mutating.lock().await;
        let mut next = self.inner.current.borrow().clone();
        mutate(&mut next);
        self.inner.current.send_replace(next.clone());
        self.inner.store.save(&next).await?;
        self.inner.bus.publish(next)
    }
}
