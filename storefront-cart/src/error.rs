use thiserror::Error;

/// Errors from cart persistence and synchronization.
#[derive(Debug, Error)]
pub enum CartError {
    /// The durable store could not be read or written.
    ///
    /// Surfaced to the caller rather than swallowed: the in-memory state
    /// keeps the mutation, but the durable copy and other contexts did not
    /// see it.
    #[error("cart storage failed: {0}")]
    Storage(#[from] std::io::Error),

    /// Cart state could not be (de)serialized.
    #[error("cart state serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The sync channel has no live receivers left.
    #[error("cart sync channel closed")]
    ChannelClosed,
}
