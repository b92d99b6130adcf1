//! User handlers
//!
//! Risk evaluation and activity analysis, either from a supplied record or
//! fetched from Mastodon first.

use axum::{
    extract::{Path, State},
    Json,
};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::entities::{ActivitySummary, Post, RiskEvaluation, UserProfile};
use crate::domain::username::normalize_username;
use crate::error::AppError;
use crate::handlers::extract::{ValidJson, ValidQuery};
use crate::AppState;

/// Number of posts fetched when the caller does not say
pub const DEFAULT_POST_LIMIT: u32 = 5;

fn default_limit() -> u32 {
    DEFAULT_POST_LIMIT
}

/// Identifies a Mastodon account by username
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UserIdentifier {
    /// `user`, `@user` or `@user@domain`
    pub username: String,
}

/// Posts to analyze for one account
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ActivityRequest {
    pub username: String,
    #[serde(default)]
    pub recent_posts: Vec<Post>,
}

/// Account whose recent posts should be fetched and analyzed
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ActivityAutoRequest {
    pub username: String,
    /// How many recent posts to fetch
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// POST /api/v1/users/evaluate
pub async fn evaluate(
    State(state): State<AppState>,
    ValidJson(profile): ValidJson<UserProfile>,
) -> Result<Json<RiskEvaluation>, AppError> {
    let evaluation = state.risk_service.evaluate(&profile).await?;
    Ok(Json(evaluation))
}

/// POST /api/v1/users/evaluate/auto
///
/// Any lookup failure is reported as an unknown user.
pub async fn evaluate_auto(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<UserIdentifier>,
) -> Result<Json<RiskEvaluation>, AppError> {
    let username = normalize_username(&req.username);

    let profile = state
        .mastodon
        .fetch_profile(username)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch Mastodon profile for {}", username);
            AppError::UserNotFound(username.to_string())
        })?;
    tracing::info!("Fetched Mastodon profile for {}", username);

    let evaluation = state.risk_service.evaluate(&profile).await?;
    Ok(Json(evaluation))
}

/// POST /api/v1/users/activity
pub async fn activity(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<ActivityRequest>,
) -> Json<ActivitySummary> {
    tracing::debug!(
        "Analyzing {} posts for {}",
        req.recent_posts.len(),
        req.username
    );
    Json(state.activity_service.analyze(&req.recent_posts).await)
}

/// POST /api/v1/users/activity/auto
pub async fn activity_auto(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<ActivityAutoRequest>,
) -> Result<Json<ActivitySummary>, AppError> {
    let username = normalize_username(&req.username);

    let posts = state
        .mastodon
        .fetch_recent_posts(username, req.limit)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch Mastodon posts for {}", username);
            AppError::UserNotFound(username.to_string())
        })?;
    tracing::info!("Fetched {} Mastodon posts for {}", posts.len(), username);

    Ok(Json(state.activity_service.analyze(&posts).await))
}

/// GET /api/v1/users/:username/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .mastodon
        .fetch_profile(normalize_username(&username))
        .await?;
    Ok(Json(profile))
}

/// GET /api/v1/users/:username/posts
pub async fn get_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
    ValidQuery(query): ValidQuery<PostsQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state
        .mastodon
        .fetch_recent_posts(normalize_username(&username), query.limit)
        .await?;
    Ok(Json(posts))
}
