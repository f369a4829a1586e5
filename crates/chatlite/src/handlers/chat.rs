//! Chat HTTP handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::relay::ChatRequest;
use crate::response;
use crate::server::AppState;

/// POST /chat
///
/// A body sent without a JSON content type is read as an empty request.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => ChatRequest::default(),
        Err(rejection) => {
            warn!(error = %rejection, "Rejected chat request body");
            return response::bad_request_with_detail("Invalid request body", rejection.body_text())
                .into_response();
        }
    };

    match state.relay.handle(request).await {
        Ok(reply) => {
            info!(outcome = ?reply.outcome, "Chat reply sent");
            (StatusCode::OK, Json(reply)).into_response()
        }
        Err(e) => {
            warn!(error = %e, status = %e.status_code(), "Chat request failed");
            e.into_response()
        }
    }
}
