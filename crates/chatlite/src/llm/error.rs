//! LLM error types.

use thiserror::Error;

/// Errors that can occur when making LLM API calls.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    ///
    /// `message` carries the raw response body. `reason` is the machine-readable
    /// error code when the body exposes one (e.g. `API_KEY_INVALID`).
    #[error("api error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        reason: Option<String>,
    },

    /// The provider refused to answer the prompt
    #[error("prompt blocked: {reason}")]
    Blocked { reason: String },
}

impl LLMError {
    /// Structured error code reported by the provider, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            LLMError::Api { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    /// HTTP status returned by the provider, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            LLMError::Api { status, .. } => Some(*status),
            LLMError::Request(e) => e.status().map(|s| s.as_u16()),
            LLMError::Blocked { .. } => None,
        }
    }
}
