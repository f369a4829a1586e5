//! Chatlite - A minimal chat relay that forwards conversations to Google Gemini.
//!
//! The relay core lives in [`relay`]; [`server`] and [`function`] are the two
//! transport adapters wrapped around it.

pub mod config;
pub mod function;
pub mod handlers;
pub mod llm;
pub mod relay;
pub mod response;
pub mod server;
