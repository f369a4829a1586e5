//! HTTP request handlers.

mod chat;
mod fallback;
mod health;
mod index;

pub use chat::chat;
pub use fallback::{handle_panic, not_found};
pub use health::health;
pub use index::index;
