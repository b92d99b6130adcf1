//! OpenAI adapter
//!
//! Chat-completion client implementing the language model port.

mod client;

pub use client::OpenAiClient;
