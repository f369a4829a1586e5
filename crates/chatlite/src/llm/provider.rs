//! LLM provider trait.

use async_trait::async_trait;

use super::error::LLMError;
use super::types::{ApiKey, ChatRequest, ChatResponse};

/// Trait for LLM providers with different API formats.
///
/// The credential is passed per call so a single provider instance can serve
/// requests that bring their own key.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Make a chat completion request.
    async fn chat(&self, api_key: &ApiKey, request: ChatRequest) -> Result<ChatResponse, LLMError>;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;
}
