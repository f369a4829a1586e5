//! Client conversation history and its mapping onto provider turns.

use serde::{Deserialize, Serialize};

use crate::llm::{Part, Turn, TurnRole};

/// Instruction prepended to every conversation when the preamble is enabled.
pub const SYSTEM_PREAMBLE: &str = "You are an expert assistant. \
    Always provide a clear, helpful response no matter what. \
    If the user asks something ambiguous, clarify it politely. \
    Never say 'I cannot respond' — always give the best possible guidance.";

/// A message in the client's conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Content,
}

/// The role of a message sender, as the client labels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(alias = "model")]
    Assistant,
}

/// Message content: a bare string or an ordered list of text segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Segments(Vec<Segment>),
}

/// One text segment, either a bare string or a `{"text": ...}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Text(String),
    Part { text: String },
}

impl Segment {
    fn into_text(self) -> String {
        match self {
            Segment::Text(text) | Segment::Part { text } => text,
        }
    }
}

impl Content {
    /// Normalize into provider parts; a bare string becomes a single part.
    pub fn into_parts(self) -> Vec<Part> {
        match self {
            Content::Text(text) => vec![Part::text(text)],
            Content::Segments(segments) => segments
                .into_iter()
                .map(|s| Part::text(s.into_text()))
                .collect(),
        }
    }

    /// Inverse of [`Content::into_parts`] up to shape: a single part always
    /// comes back as `Text`, and several parts as bare `Segment::Text`s.
    fn from_parts(mut parts: Vec<Part>) -> Self {
        if parts.len() == 1 {
            let part = parts.remove(0);
            return Content::Text(part.text);
        }
        Content::Segments(parts.into_iter().map(|p| Segment::Text(p.text)).collect())
    }
}

impl From<Role> for TurnRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => TurnRole::User,
            Role::Assistant => TurnRole::Model,
        }
    }
}

impl From<TurnRole> for Role {
    fn from(role: TurnRole) -> Self {
        match role {
            TurnRole::User => Role::User,
            TurnRole::Model => Role::Assistant,
        }
    }
}

impl From<ChatMessage> for Turn {
    fn from(message: ChatMessage) -> Self {
        Turn {
            role: message.role.into(),
            parts: message.content.into_parts(),
        }
    }
}

impl From<Turn> for ChatMessage {
    fn from(turn: Turn) -> Self {
        ChatMessage {
            role: turn.role.into(),
            content: Content::from_parts(turn.parts),
        }
    }
}

/// Build the provider history from the client's history, oldest first.
pub fn build(system_preamble: bool, history: Vec<ChatMessage>) -> Vec<Turn> {
    let preamble = system_preamble.then(|| Turn::user(SYSTEM_PREAMBLE));
    preamble
        .into_iter()
        .chain(history.into_iter().map(Turn::from))
        .collect()
}
