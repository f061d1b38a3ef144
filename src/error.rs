//! Error types for the admin client.

use thiserror::Error;

/// Result type alias using the feedesk error type.
pub type Result<T> = std::result::Result<T, FeedeskError>;

/// Main error type for the admin client.
///
/// Every variant is terminal at the UI boundary: write-path failures surface
/// as a toast, read-path failures are logged and the stale list is kept.
/// Nothing is retried automatically.
#[derive(Error, Debug)]
pub enum FeedeskError {
    /// The server answered with a non-200 status. Carries the message from a
    /// conventional `{"error": "..."}` response body when one was present.
    /// Server-side validation failures arrive through this variant too.
    #[error("server rejected the request with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// Client-side gating failed before any request was issued (a required
    /// field was empty, or a numeric field did not parse).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error (e.g., the API base URL is not set).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request could not complete (transport failure, timeout).
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FeedeskError {
    /// The server-supplied error message, when this failure carried one.
    ///
    /// Toasting callers fall back to their own generic string otherwise.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FeedeskError::Rejected {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}
