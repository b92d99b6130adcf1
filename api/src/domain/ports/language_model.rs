//! Language model port trait
//!
//! The single chokepoint for all chat-completion calls. Implementations are
//! fail-fast: no retries, every failure is reported as `LlmError::Unavailable`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::LlmError;

/// Port trait for chat-completion calls
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send `payload` (serialized to JSON) as the user turn under a fixed
    /// system prompt and return the raw text of the first choice.
    async fn complete(
        &self,
        system_prompt: &str,
        payload: &serde_json::Value,
    ) -> Result<String, LlmError>;
}

/// A record the model is asked to produce as JSON
///
/// Decoding handles required fields and enum values; `validate` adds the
/// range checks serde cannot express.
pub trait ModelReply: DeserializeOwned {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
