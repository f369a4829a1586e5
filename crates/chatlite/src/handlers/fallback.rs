use std::any::Any;

use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::response;

/// Fallback for unmatched routes and methods.
pub async fn not_found() -> Response {
    response::not_found("Endpoint not found").into_response()
}

/// Response for a handler that panicked. The panic payload is logged, never sent.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!(panic = detail, "Unhandled error while serving request");

    response::internal_error("Internal server error", "Something went wrong on the server")
        .into_response()
}
