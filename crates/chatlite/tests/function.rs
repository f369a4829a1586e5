mod common;

use serde_json::{Value, json};

use chatlite::function::{self, InvocationEvent};
use chatlite::server::{AppState, Deployment, build_app};

use common::{ScriptedProvider, relay};

fn function_app(provider: std::sync::Arc<ScriptedProvider>, api_key: Option<&str>) -> axum::Router {
    build_app(AppState::new(relay(provider, api_key), Deployment::Function), 30)
}

fn event(value: Value) -> InvocationEvent {
    function::parse_event(&value.to_string()).unwrap()
}

#[tokio::test]
async fn test_invoke_health_reports_function_deployment() {
    let app = function_app(ScriptedProvider::replying("ok"), None);

    let response = function::invoke(app, event(json!({"path": "/health"})))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Backend (function) is running with Gemini AI");
    assert_eq!(response.headers["content-type"], "application/json");
}

#[tokio::test]
async fn test_invoke_chat_with_json_body() {
    let provider = ScriptedProvider::replying("Hi there!");
    let app = function_app(provider.clone(), Some("env-key"));

    let response = function::invoke(
        app,
        event(json!({
            "method": "POST",
            "path": "/chat",
            "body": {"message": "Hello", "apiKey": "request-key"}
        })),
    )
    .await
    .unwrap();

    assert_eq!(response.status_code, 200);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body, json!({"response": "Hi there!"}));
    assert_eq!(provider.calls()[0].api_key, "request-key");
}

#[tokio::test]
async fn test_invoke_chat_with_raw_string_body() {
    let app = function_app(ScriptedProvider::replying("Hi there!"), Some("k"));

    let response = function::invoke(
        app,
        event(json!({
            "method": "POST",
            "path": "/chat",
            "headers": {"content-type": "application/json"},
            "body": "{\"message\": \"Hello\"}"
        })),
    )
    .await
    .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, r#"{"response":"Hi there!"}"#);
}

#[tokio::test]
async fn test_invoke_missing_message() {
    let app = function_app(ScriptedProvider::replying("unused"), Some("k"));

    let response = function::invoke(
        app,
        event(json!({"method": "POST", "path": "/chat", "body": {}})),
    )
    .await
    .unwrap();

    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, r#"{"error":"Message is required"}"#);
}

#[tokio::test]
async fn test_invoke_unknown_path() {
    let app = function_app(ScriptedProvider::replying("unused"), Some("k"));

    let response = function::invoke(app, event(json!({"path": "/missing"})))
        .await
        .unwrap();

    assert_eq!(response.status_code, 404);
    assert_eq!(response.body, r#"{"error":"Endpoint not found"}"#);
}

#[test]
fn test_response_serializes_status_code_in_camel_case() {
    let response = function::InvocationResponse {
        status_code: 200,
        headers: Default::default(),
        body: "{}".to_string(),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["statusCode"], 200);
    assert!(json.get("status_code").is_none());
}
