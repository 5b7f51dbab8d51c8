//! Error types for completion service calls.

use thiserror::Error;

/// Errors that can occur while talking to a completion provider.
///
/// These never cross the section generator boundary: every variant is folded
/// into a failed [`CompletionResponse`](super::CompletionResponse).
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Provider returned an error response (4xx, 5xx).
    #[error("Provider error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Provider response doesn't match the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider answered successfully but produced no text.
    #[error("Provider returned an empty completion")]
    EmptyCompletion,

    /// Provider configuration error (missing key, bad URL).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CompletionError {
    /// Map a reqwest transport error, distinguishing timeouts.
    pub(crate) fn from_transport(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            CompletionError::Timeout(timeout_ms)
        } else {
            CompletionError::Network(e.to_string())
        }
    }
}
