//! Relay error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response;

/// Failures surfaced to the client as error responses.
///
/// Provider outages are not represented here: they degrade into a normal reply.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request itself is unusable.
    #[error("{0}")]
    InvalidRequest(String),

    /// No credential is configured and the request did not supply one.
    #[error("no API key configured; set GEMINI_API_KEY or pass apiKey in the request")]
    Configuration,

    /// The provider rejected the credential.
    #[error("Invalid API key.")]
    Auth,

    /// The provider quota is exhausted.
    #[error("Rate limit exceeded.")]
    RateLimit,
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Auth => StatusCode::UNAUTHORIZED,
            RelayError::RateLimit => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::InvalidRequest(msg) => response::bad_request(msg).into_response(),
            RelayError::Configuration => {
                response::internal_error("Configuration error", self.to_string()).into_response()
            }
            RelayError::Auth => response::unauthorized(self.to_string()).into_response(),
            RelayError::RateLimit => response::too_many_requests(self.to_string()).into_response(),
        }
    }
}
