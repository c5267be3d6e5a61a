//! Error types for the translation engine.
//!
//! Provider failures are recovered per leaf and never leave the Leaf
//! Translator. `TranslateError` is what a caller of the traversal can see.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single call to the remote translation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure, including the per-call timeout
    #[error("request to translation provider failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("translation provider error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("malformed translation response: {0}")]
    MalformedResponse(String),
}

/// Failure of a whole translation operation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The supplied text is not valid JSON. Raised before any traversal.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The caller cancelled the traversal
    #[error("translation cancelled")]
    Cancelled,

    /// The overall deadline expired before every leaf resolved
    #[error("translation timed out after {0:?}")]
    TimedOut(Duration),
}

impl TranslateError {
    /// Whether this error happened before traversal started.
    pub fn is_input_error(&self) -> bool {
        matches!(self, TranslateError::InvalidJson(_))
    }
}
