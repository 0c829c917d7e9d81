use async_trait::async_trait;
use thiserror::Error;

/// Errors produced by a listing fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint URL could not be parsed.
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// The request never produced a response.
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("Upstream error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("Failed to decode listing response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Failure reported by a custom fetch implementation.
    #[error("{0}")]
    Other(String),
}

/// The fetch capability the coordinator drives.
///
/// One call is a single-shot request. Implementations must tolerate the
/// returned future being dropped before it resolves; that is how stale
/// requests are cancelled.
#[async_trait]
pub trait ListingApi<P, R>: Send + Sync {
    async fn get_all(&self, params: P) -> Result<R, FetchError>;
}
