#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use chatlite::llm::{ApiKey, ChatRequest, ChatResponse, LLMError, LLMProvider};
use chatlite::relay::ChatRelay;
use chatlite::server::{AppState, Deployment, build_app};

type Script = Box<dyn Fn() -> Result<ChatResponse, LLMError> + Send + Sync>;

/// A call the relay made to the provider.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub api_key: String,
    pub request: ChatRequest,
}

/// In-process provider that answers from a script and records every call.
pub struct ScriptedProvider {
    script: Script,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new(
        script: impl Fn() -> Result<ChatResponse, LLMError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Box::new(script),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::new(move || {
            Ok(ChatResponse {
                text: text.clone(),
                ..ChatResponse::default()
            })
        })
    }

    pub fn failing(error: impl Fn() -> LLMError + Send + Sync + 'static) -> Arc<Self> {
        Self::new(move || Err(error()))
    }

    pub fn api_error(status: u16, message: &str) -> Arc<Self> {
        let message = message.to_string();
        Self::failing(move || LLMError::Api {
            status,
            message: message.clone(),
            reason: None,
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn chat(&self, api_key: &ApiKey, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: api_key.expose().to_string(),
            request,
        });
        (self.script)()
    }

    fn name(&self) -> &str {
        "Scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}

pub fn relay(provider: Arc<ScriptedProvider>, api_key: Option<&str>) -> ChatRelay {
    ChatRelay::new(provider, api_key.map(ApiKey::new))
}

pub fn app(provider: Arc<ScriptedProvider>, api_key: Option<&str>) -> Router {
    app_with_relay(relay(provider, api_key))
}

pub fn app_with_relay(relay: ChatRelay) -> Router {
    build_app(AppState::new(relay, Deployment::Server), 30)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn post_chat(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(app, request).await
}
