//! Single-invocation adapter.
//!
//! Serverless platforms hand the process one HTTP request and expect one
//! response back. [`invoke`] runs such an event through the same router the
//! listening server uses, so both entry points share every route and layer.
//!
//! Event shape (JSON):
//!
//! ```json
//! {"method": "POST", "path": "/chat", "headers": {"content-type": "application/json"},
//!  "body": {"message": "Hello"}}
//! ```
//!
//! `body` may be a JSON value or a raw string. Response shape:
//!
//! ```json
//! {"statusCode": 200, "headers": {"content-type": "application/json"},
//!  "body": "{\"response\":\"Hi there!\"}"}
//! ```

use std::collections::BTreeMap;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower::ServiceExt;

/// One inbound request.
#[derive(Debug, Clone, Deserialize)]
pub struct InvocationEvent {
    #[serde(default = "default_method")]
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// The response handed back to the platform.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("failed to parse invocation event: {0}")]
    Event(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("failed to read response body: {0}")]
    Body(#[from] axum::Error),
}

pub fn parse_event(input: &str) -> Result<InvocationEvent, FunctionError> {
    Ok(serde_json::from_str(input)?)
}

impl InvocationEvent {
    fn into_request(self) -> Result<Request<Body>, FunctionError> {
        let has_content_type = self
            .headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));

        let mut builder = Request::builder()
            .method(self.method.as_str())
            .uri(self.path.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = match self.body {
            None | Some(serde_json::Value::Null) => Body::empty(),
            Some(serde_json::Value::String(raw)) => Body::from(raw),
            Some(value) => {
                if !has_content_type {
                    builder = builder.header(CONTENT_TYPE, "application/json");
                }
                Body::from(serde_json::to_vec(&value)?)
            }
        };

        Ok(builder.body(body)?)
    }
}

/// Dispatch one event through `app` and collect the full response.
pub async fn invoke(
    app: Router,
    event: InvocationEvent,
) -> Result<InvocationResponse, FunctionError> {
    let request = event.into_request()?;
    let Ok(response) = app.oneshot(request).await;

    let (parts, body) = response.into_parts();
    let bytes = body.collect().await?.to_bytes();

    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    Ok(InvocationResponse {
        status_code: parts.status.as_u16(),
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}
