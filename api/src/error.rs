//! Unified error types for the moderation API
//!
//! This module defines error types for each layer:
//! - `LlmError`: language-model gateway failures (the only kinds the core recovers from)
//! - `MastodonError`: Mastodon API client errors
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Language-model gateway errors
///
/// Callers decide recovery per kind: the triage engine and the activity
/// classifier swallow all three, the risk evaluator surfaces them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LlmError {
    #[error("Language model unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Model response has invalid shape: {0}")]
    InvalidShape(String),
}

/// Mastodon API client errors
#[derive(Debug, Error)]
pub enum MastodonError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("MASTODON_ACCESS_TOKEN not set in environment")]
    NotConfigured,
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Evaluation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Mastodon error: {0}")]
    Mastodon(#[from] MastodonError),

    /// Upstream lookup behind an auto-fetch endpoint failed
    #[error("Mastodon user not found: {0}")]
    UserNotFound(String),

    /// Admin read-through proxy failed
    #[error("{0}")]
    Upstream(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Llm(e) => {
                tracing::error!("Language model error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Evaluation failed",
                    Some(e.to_string()),
                )
            }
            AppError::Mastodon(e) => {
                tracing::error!("Mastodon error: {}", e);
                match e {
                    MastodonError::NotFound(name) => (
                        StatusCode::NOT_FOUND,
                        "Not found",
                        Some(format!("Mastodon user not found: {}", name)),
                    ),
                    MastodonError::RateLimited => {
                        (StatusCode::TOO_MANY_REQUESTS, "Rate limited", None)
                    }
                    MastodonError::NotConfigured => (
                        StatusCode::BAD_GATEWAY,
                        "Mastodon service error",
                        Some(e.to_string()),
                    ),
                    _ => (StatusCode::BAD_GATEWAY, "Mastodon service error", None),
                }
            }
            AppError::UserNotFound(username) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Unprocessable entity",
                Some(format!("Mastodon user not found: {}", username)),
            ),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "Bad gateway", Some(msg.clone())),
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
