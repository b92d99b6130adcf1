//! HTTP client for the moderation API
//!
//! The MCP server holds no moderation logic of its own; every tool call is
//! forwarded to the API and the JSON result decoded here.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// HTTP client for communicating with the moderation API
#[derive(Clone)]
pub struct SubmindClient {
    client: reqwest::Client,
    base_url: String,
}

impl SubmindClient {
    /// Create a new client from environment variables
    ///
    /// - SUBMIND_API_URL: Base URL of the API (default http://localhost:8080)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("SUBMIND_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self::new(&base_url)
    }

    /// Create a new client with explicit configuration
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn evaluate(&self, profile: &ProfileRecord) -> Result<Evaluation> {
        self.post_json("/api/v1/users/evaluate", profile).await
    }

    pub async fn evaluate_auto(&self, username: &str) -> Result<Evaluation> {
        self.post_json(
            "/api/v1/users/evaluate/auto",
            &UsernameRequest {
                username: username.to_string(),
            },
        )
        .await
    }

    pub async fn analyze_activity(
        &self,
        username: &str,
        recent_posts: &[PostRecord],
    ) -> Result<ActivitySummary> {
        self.post_json(
            "/api/v1/users/activity",
            &ActivityRequest {
                username,
                recent_posts,
            },
        )
        .await
    }

    pub async fn analyze_activity_auto(&self, username: &str, limit: u32) -> Result<ActivitySummary> {
        self.post_json(
            "/api/v1/users/activity/auto",
            &ActivityAutoRequest { username, limit },
        )
        .await
    }

    pub async fn triage(&self, report: &ReportRecord) -> Result<TriageResult> {
        self.post_json("/api/v1/reports/submit", report).await
    }

    pub async fn profile(&self, username: &str) -> Result<ProfileRecord> {
        self.get_json(&format!("/api/v1/users/{}/profile", username))
            .await
    }

    pub async fn posts(&self, username: &str, limit: u32) -> Result<Vec<PostRecord>> {
        self.get_json(&format!("/api/v1/users/{}/posts?limit={}", username, limit))
            .await
    }

    /// Agent description plus the model and feature switches in effect
    pub async fn capabilities(&self) -> Result<AgentCapabilities> {
        self.get_json("/schema/capabilities").await
    }

    // --- Internal helpers ---

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", path))?;

        handle_json_response(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to POST {}", path))?;

        handle_json_response(response).await
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        anyhow::bail!("API error ({}): {}", status, error_detail(&body));
    }

    serde_json::from_str(&body).context("Failed to decode API response")
}

/// Prefer the `details` (then `error`) field of a JSON error body
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.details.or(e.error))
        .unwrap_or_else(|| body.to_string())
}

// --- Request Types ---

#[derive(Debug, Serialize)]
struct UsernameRequest {
    username: String,
}

#[derive(Debug, Serialize)]
struct ActivityRequest<'a> {
    username: &'a str,
    recent_posts: &'a [PostRecord],
}

#[derive(Debug, Serialize)]
struct ActivityAutoRequest<'a> {
    username: &'a str,
    limit: u32,
}

// --- Shared Types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub username: String,
    pub bio: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub statuses_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub favorites: u64,
    pub reblogs: u64,
}

/// Reasons the API accepts for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Abuse,
    Spam,
    Harassment,
    Impersonation,
    Other,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRecord {
    pub reporter: String,
    pub username: String,
    pub reason: ReportReason,
    pub comment: Option<String>,
    pub post_excerpt: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Response Types ---

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    details: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Evaluation {
    pub risk_score: f64,
    pub recommendation: String,
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvgEngagement {
    pub favorites: f64,
    pub reblogs: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySummary {
    pub post_count: usize,
    pub avg_engagement: AvgEngagement,
    pub posting_frequency: String,
    pub category: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriageResult {
    pub triage_level: String,
    pub action: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Features {
    #[serde(default)]
    pub llm_activity: bool,
    #[serde(default)]
    pub llm_triage: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentCapabilities {
    pub agent_name: String,
    pub version: String,
    pub model: String,
    #[serde(default)]
    pub features: Features,
}
