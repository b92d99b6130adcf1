//! Mastodon client port trait
//!
//! Defines the interface for reading accounts, statuses and admin data
//! from the Mastodon instance.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{AdminReport, InstanceInfo, Post, UserProfile};
use crate::error::MastodonError;

/// Port trait for Mastodon operations
#[async_trait]
pub trait MastodonClient: Send + Sync {
    /// Look up an account's profile. `username` may be `user`, `user@domain`
    /// or `@user@domain`.
    async fn fetch_profile(&self, username: &str) -> Result<UserProfile, MastodonError>;

    /// Most recent statuses of an account, newest first
    async fn fetch_recent_posts(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Post>, MastodonError>;

    /// Domains this instance federates with
    async fn instance_peers(&self) -> Result<Vec<String>, MastodonError>;

    /// Known federated instances with metrics (admin scope)
    async fn admin_instances(&self) -> Result<Vec<InstanceInfo>, MastodonError>;

    /// Reports in the instance's moderation queue (admin scope)
    async fn admin_reports(&self) -> Result<Vec<AdminReport>, MastodonError>;

    /// Raw system measures for a time window (admin scope)
    async fn admin_measures(
        &self,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Result<serde_json::Value, MastodonError>;
}
