//! Chat relay: validates a client request, forwards it to the provider and
//! shapes the reply.
//!
//! Outcomes of [`ChatRelay::handle`]:
//!
//! | Situation                          | Result                                   |
//! |------------------------------------|------------------------------------------|
//! | `message` missing or empty         | `RelayError::InvalidRequest` (400)       |
//! | no credential anywhere             | `RelayError::Configuration` (500)        |
//! | provider answered with text        | reply with that text                     |
//! | provider answered with blank text  | reply with [`EMPTY_RESPONSE_FALLBACK`]   |
//! | provider rejected the key          | `RelayError::Auth` (401)                 |
//! | provider quota exhausted           | `RelayError::RateLimit` (429)            |
//! | any other provider failure         | reply built by [`degraded_response`]     |

mod classify;
mod error;
pub mod history;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::llm::{self, ApiKey, LLMProvider};

pub use classify::{ProviderFailure, classify};
pub use error::RelayError;
pub use history::{ChatMessage, Content, Role, Segment};

/// Output length cap sent with every provider request.
pub const MAX_OUTPUT_TOKENS: u32 = 500;

/// Sampling temperature sent with every provider request.
pub const TEMPERATURE: f32 = 0.7;

/// Reply used when the provider returns blank text.
pub const EMPTY_RESPONSE_FALLBACK: &str = "I am your expert assistant. \
    It seems the system couldn’t generate a detailed answer right now, but I’m here to help. \
    Please rephrase or try again.";

/// Reply used when the provider fails for a reason other than auth or quota.
/// Echoes the client's message verbatim.
pub fn degraded_response(message: &str) -> String {
    format!(
        "I'm experiencing some technical difficulties right now. \
         Here's a mock response to your message: \"{message}\". \
         Please try again later or check your API configuration."
    )
}

// ============================================================================
// Request/Reply Types
// ============================================================================

/// A chat request as sent by the client.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_history: Option<Vec<ChatMessage>>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// A successful reply. Serializes as `{"response": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(skip)]
    pub outcome: ReplyOutcome,
}

/// Where the reply text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The provider's own answer.
    Answered,
    /// The provider answered with blank text.
    EmptyFallback,
    /// The provider failed and the failure was masked.
    Degraded,
}

impl ChatReply {
    fn from_provider(text: String) -> Self {
        if text.trim().is_empty() {
            return Self {
                response: EMPTY_RESPONSE_FALLBACK.to_string(),
                outcome: ReplyOutcome::EmptyFallback,
            };
        }
        Self {
            response: text,
            outcome: ReplyOutcome::Answered,
        }
    }

    fn degraded(message: &str) -> Self {
        Self {
            response: degraded_response(message),
            outcome: ReplyOutcome::Degraded,
        }
    }
}

// ============================================================================
// ChatRelay
// ============================================================================

/// Forwards chat requests to an LLM provider.
///
/// Holds only read-only configuration, so clones can be shared freely across
/// concurrent requests.
#[derive(Clone)]
pub struct ChatRelay {
    provider: Arc<dyn LLMProvider>,
    default_api_key: Option<ApiKey>,
    system_preamble: bool,
}

impl ChatRelay {
    pub fn new(provider: Arc<dyn LLMProvider>, default_api_key: Option<ApiKey>) -> Self {
        Self {
            provider,
            default_api_key,
            system_preamble: true,
        }
    }

    /// Enable or disable the instruction turn prepended to every history.
    pub fn with_system_preamble(mut self, enabled: bool) -> Self {
        self.system_preamble = enabled;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Handle one chat request.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatReply, RelayError> {
        let message = match request.message {
            Some(m) if !m.is_empty() => m,
            _ => return Err(RelayError::InvalidRequest("Message is required".to_string())),
        };

        let api_key = self.resolve_api_key(request.api_key)?;

        let history = history::build(
            self.system_preamble,
            request.conversation_history.unwrap_or_default(),
        );
        debug!(turns = history.len(), model = self.model(), "Forwarding chat message");

        let llm_request = llm::ChatRequest {
            history,
            message: message.clone(),
            temperature: Some(TEMPERATURE),
            max_output_tokens: Some(MAX_OUTPUT_TOKENS),
        };

        match self.provider.chat(&api_key, llm_request).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    debug!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        total_tokens = usage.total_tokens,
                        "Provider token usage"
                    );
                }
                let reply = ChatReply::from_provider(response.text);
                if reply.outcome == ReplyOutcome::EmptyFallback {
                    warn!(
                        finish_reason = ?response.finish_reason,
                        "Provider returned empty text, using fallback reply"
                    );
                }
                Ok(reply)
            }
            Err(e) => match classify(&e) {
                ProviderFailure::InvalidApiKey => {
                    error!(error = %e, "Provider rejected API key");
                    Err(RelayError::Auth)
                }
                ProviderFailure::QuotaExceeded => {
                    error!(error = %e, "Provider quota exceeded");
                    Err(RelayError::RateLimit)
                }
                ProviderFailure::Unavailable => {
                    warn!(error = %e, "Provider request failed, returning degraded reply");
                    Ok(ChatReply::degraded(&message))
                }
            },
        }
    }

    /// The request's own key wins over the configured default.
    fn resolve_api_key(&self, override_key: Option<String>) -> Result<ApiKey, RelayError> {
        ApiKey::from_optional(override_key)
            .or_else(|| self.default_api_key.clone())
            .ok_or(RelayError::Configuration)
    }
}
