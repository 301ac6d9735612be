//! Durable cart storage.
//!
//! The synchronizer persists the whole cart document under one fixed key
//! after every mutation and hydrates from it at start-up. [`JsonFileStore`]
//! is the durable implementation; [`MemoryStore`] backs tests and demos,
//! where clones of one store play the role of the storage shared between
//! contexts.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::CartError;
use crate::state::CartState;

/// Fixed key the cart document is stored under.
pub const STORAGE_KEY: &str = "cart_items";

/// Durable, per-profile storage for the cart document.
#[async_trait]
pub trait CartStore: Send + Sync + 'static {
    /// Reads the stored cart; `None` when nothing was ever saved.
    async fn load(&self) -> Result<Option<CartState>, CartError>;

    /// Replaces the stored cart with `state`.
    async fn save(&self, state: &CartState) -> Result<(), CartError>;
}

/// Cart storage as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Stores the cart document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// Stores the cart document as `cart_items.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        JsonFileStore {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }
}

#[async_trait]
impl CartStore for JsonFileStore {
    async fn load(&self) -> Result<Option<CartState>, CartError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(CartError::Storage(err)),
        }
    }

    async fn save(&self, state: &CartState) -> Result<(), CartError> {
        let bytes = serde_json::to_vec(state)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

/// In-process cart storage.
///
/// Clones share the same underlying document, so handing clones of one
/// `MemoryStore` to several synchronizers models several contexts sharing
/// one origin's storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<Option<CartState>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn load(&self) -> Result<Option<CartState>, CartError> {
        Ok(self.state.lock().expect("cart store lock poisoned").clone())
    }

    async fn save(&self, state: &CartState) -> Result<(), CartError> {
        *self.state.lock().expect("cart store lock poisoned") = Some(state.clone());
        Ok(())
    }
}
