//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod mastodon;
pub mod openai;

pub use mastodon::MastodonClientImpl;
pub use openai::OpenAiClient;
