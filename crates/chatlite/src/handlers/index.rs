use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::server::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexResponse {
    message: &'static str,
    endpoints: BTreeMap<&'static str, &'static str>,
    ai_provider: String,
    model: String,
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    let endpoints = BTreeMap::from([
        ("POST /chat", "Send a message and get AI response"),
        ("GET /health", "Health check"),
    ]);

    Json(IndexResponse {
        message: "ChatGPT Lite Backend API (Powered by Gemini)",
        endpoints,
        ai_provider: state.relay.provider_name().to_string(),
        model: state.relay.model().to_string(),
    })
}
