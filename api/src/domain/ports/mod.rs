//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod language_model;
pub mod mastodon;

pub use language_model::{LanguageModel, ModelReply};
pub use mastodon::MastodonClient;
