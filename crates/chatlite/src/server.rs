use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::handlers;
use crate::llm::{ApiKey, GeminiProvider};
use crate::relay::ChatRelay;

/// Which transport adapter is serving requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// Long-running listener.
    Server,
    /// One request per process invocation.
    Function,
}

impl Deployment {
    pub fn health_message(self) -> &'static str {
        match self {
            Deployment::Server => "ChatGPT Lite Backend is running with Gemini AI",
            Deployment::Function => "Backend (function) is running with Gemini AI",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: ChatRelay,
    pub deployment: Deployment,
}

impl AppState {
    pub fn new(relay: ChatRelay, deployment: Deployment) -> Self {
        Self { relay, deployment }
    }

    /// Wire a Gemini-backed relay from configuration.
    pub fn from_config(config: &Config, api_key: Option<ApiKey>, deployment: Deployment) -> Self {
        let provider = GeminiProvider::new(&config.gemini.base_url, &config.gemini.model);
        let relay = ChatRelay::new(Arc::new(provider), api_key)
            .with_system_preamble(config.relay.system_preamble);
        Self::new(relay, deployment)
    }
}

pub fn build_app(state: AppState, request_timeout_secs: u64) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_secs),
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind `host:port` and serve until Ctrl-C.
pub async fn serve(app: Router, host: &str, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    info!(addr = %listener.local_addr()?, "chatlite listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
