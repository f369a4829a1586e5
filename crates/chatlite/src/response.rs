//! JSON error responses.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn error(status: StatusCode, error: impl Into<String>, message: Option<String>) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: error.into(),
            message,
        }),
    )
}

pub fn bad_request(msg: impl Into<String>) -> ErrorResponse {
    error(StatusCode::BAD_REQUEST, msg, None)
}

/// 400 with a short error and a longer explanation.
pub fn bad_request_with_detail(msg: impl Into<String>, detail: impl Into<String>) -> ErrorResponse {
    error(StatusCode::BAD_REQUEST, msg, Some(detail.into()))
}

pub fn unauthorized(msg: impl Into<String>) -> ErrorResponse {
    error(StatusCode::UNAUTHORIZED, msg, None)
}

pub fn too_many_requests(msg: impl Into<String>) -> ErrorResponse {
    error(StatusCode::TOO_MANY_REQUESTS, msg, None)
}

pub fn not_found(msg: impl Into<String>) -> ErrorResponse {
    error(StatusCode::NOT_FOUND, msg, None)
}

pub fn internal_error(msg: impl Into<String>, detail: impl Into<String>) -> ErrorResponse {
    error(StatusCode::INTERNAL_SERVER_ERROR, msg, Some(detail.into()))
}
