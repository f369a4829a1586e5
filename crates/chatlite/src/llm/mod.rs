//! LLM provider client for chat completions.

mod error;
mod gemini;
mod provider;
mod types;

pub use error::LLMError;
pub use gemini::GeminiProvider;
pub use provider::LLMProvider;
pub use types::{ApiKey, ChatRequest, ChatResponse, Part, Turn, TurnRole, Usage};
