//! Language-model gateway helpers
//!
//! Turns a domain record into a model payload and a raw model reply back
//! into a validated record. The gateway never recovers its own errors;
//! each service decides what a failure means for its caller.

use serde::Serialize;

use crate::domain::ports::{LanguageModel, ModelReply};
use crate::error::LlmError;

/// Serialize a record as the user turn of a completion request
pub fn to_payload<T: Serialize + ?Sized>(record: &T) -> Result<serde_json::Value, LlmError> {
    // Nothing is sent if the record cannot be serialized
    serde_json::to_value(record)
        .map_err(|e| LlmError::Unavailable(format!("could not serialize payload: {}", e)))
}

/// Parse a raw model reply into a validated record
///
/// Text that is not JSON is `MalformedResponse`; JSON that does not decode
/// into `T` or fails `T::validate` is `InvalidShape`.
pub fn parse_reply<T: ModelReply>(raw: &str) -> Result<T, LlmError> {
    let value: serde_json::Value = serde_json::from_str(raw.trim())
        .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

    let record: T =
        serde_json::from_value(value).map_err(|e| LlmError::InvalidShape(e.to_string()))?;

    record.validate().map_err(LlmError::InvalidShape)?;
    Ok(record)
}

/// One completion call followed by `parse_reply`
pub async fn request_record<T, LM>(
    llm: &LM,
    system_prompt: &str,
    payload: &serde_json::Value,
) -> Result<T, LlmError>
where
    T: ModelReply,
    LM: LanguageModel + ?Sized,
{
    let raw = llm.complete(system_prompt, payload).await?;
    parse_reply(&raw)
}
