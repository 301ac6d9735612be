use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by [`CatalogClient`](crate::CatalogClient).
///
/// The variants map one to one onto the retry classification: only
/// transport failures are transient. A non-2xx status is a statement from
/// the server, not a network hiccup, so it is not retried by the default
/// policy; neither is a body that fails to decode.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never completed: connection failure, timeout, or an
    /// equivalent transport-level problem.
    #[error("catalog request for `{resource}` failed in transport: {source}")]
    Transport {
        /// Path of the resource the client was fetching.
        resource: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("catalog returned {status} for `{resource}`")]
    Status {
        /// Response status code.
        status: StatusCode,
        /// Path of the resource the client was fetching.
        resource: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed catalog response for `{resource}`: {source}")]
    Decode {
        /// Path of the resource the client was fetching.
        resource: String,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// The client could not be constructed from its configuration.
    #[error("invalid catalog configuration: {0}")]
    Config(String),
}

impl CatalogError {
    /// Whether retrying the same request could plausibly succeed.
    ///
    /// This is the default retry predicate for catalog operations.
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogError::Transport { .. })
    }
}
