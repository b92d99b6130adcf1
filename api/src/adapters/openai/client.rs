//! OpenAI-compatible chat-completion client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::ports::LanguageModel;
use crate::error::LlmError;

/// Implementation of the language model port over `/chat/completions`
pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("submind-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Request types for the chat-completion API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response types from the chat-completion API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn first_content(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| LlmError::Unavailable("response contained no choices".to_string()))
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        payload: &serde_json::Value,
    ) -> Result<String, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::Unavailable(
                "OPENAI_API_KEY not set in environment".to_string(),
            ));
        }

        let user_turn = payload.to_string();
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &user_turn,
                },
            ],
        };

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "OpenAI API error: {}", message);
            return Err(LlmError::Unavailable(format!(
                "API error: {} - {}",
                status.as_u16(),
                message
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Unavailable(format!("unreadable completion: {}", e)))?;

        body.first_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: &str) -> OpenAiClient {
        OpenAiClient::new(
            "https://api.openai.com/v1/".to_string(),
            api_key.to_string(),
            "gpt-3.5-turbo".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn completions_url_trims_trailing_slash() {
        assert_eq!(
            client("sk-test").completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn request_serialization() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "prompt",
                },
                ChatMessage {
                    role: "user",
                    content: r#"{"a":1}"#,
                },
            ],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], r#"{"a":1}"#);
    }

    #[test]
    fn first_choice_content_is_returned() {
        let json = r#"{"choices": [
            {"message": {"role": "assistant", "content": "first"}},
            {"message": {"role": "assistant", "content": "second"}}
        ]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_content().unwrap(), "first");
    }

    #[test]
    fn empty_choices_is_unavailable() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            response.first_content(),
            Err(LlmError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn missing_api_key_is_unavailable_without_request() {
        let result = client("").complete("prompt", &serde_json::json!({})).await;
        assert!(matches!(result, Err(LlmError::Unavailable(_))));
    }
}
