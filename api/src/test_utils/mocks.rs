//! Mock implementations of port traits
//!
//! In-memory doubles that can be configured per test and record what they
//! were asked for.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{AdminReport, InstanceInfo, Post, UserProfile};
use crate::domain::ports::{LanguageModel, MastodonClient};
use crate::error::{LlmError, MastodonError};

// ============================================================================
// Mock Language Model
// ============================================================================

/// Canned-reply language model
///
/// Every call is recorded as `(system_prompt, payload)`.
#[derive(Default)]
pub struct MockLanguageModel {
    reply: String,
    should_fail: bool,
    calls: Arc<RwLock<Vec<(String, serde_json::Value)>>>,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with `reply`
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Self::default()
        }
    }

    /// Always fail as if the provider were unreachable
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete(
        &self,
        system_prompt: &str,
        payload: &serde_json::Value,
    ) -> Result<String, LlmError> {
        self.calls
            .write()
            .unwrap()
            .push((system_prompt.to_string(), payload.clone()));

        if self.should_fail {
            return Err(LlmError::Unavailable("mock provider down".to_string()));
        }
        Ok(self.reply.clone())
    }
}

// ============================================================================
// Mock Mastodon Client
// ============================================================================

#[derive(Default)]
pub struct MockMastodonClient {
    profile: Option<UserProfile>,
    posts: Vec<Post>,
    peers: Vec<String>,
    instances: Vec<InstanceInfo>,
    admin_reports: Vec<AdminReport>,
    should_fail: bool,
    post_limits: Arc<RwLock<Vec<u32>>>,
    measure_window: Arc<RwLock<Option<(DateTime<Utc>, DateTime<Utc>)>>>,
}

impl MockMastodonClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with an upstream API error
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// The only account this server knows about
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = posts;
        self
    }

    pub fn with_peers(mut self, peers: Vec<String>) -> Self {
        self.peers = peers;
        self
    }

    pub fn with_instances(mut self, instances: Vec<InstanceInfo>) -> Self {
        self.instances = instances;
        self
    }

    pub fn with_admin_reports(mut self, reports: Vec<AdminReport>) -> Self {
        self.admin_reports = reports;
        self
    }

    /// Limits passed to `fetch_recent_posts`, in call order
    pub fn post_limits(&self) -> Vec<u32> {
        self.post_limits.read().unwrap().clone()
    }

    /// Window requested by the last `admin_measures` call
    pub fn measure_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        *self.measure_window.read().unwrap()
    }

    fn check(&self) -> Result<(), MastodonError> {
        if self.should_fail {
            return Err(MastodonError::Api {
                status: 503,
                message: "mock upstream down".to_string(),
            });
        }
        Ok(())
    }

    fn find_profile(&self, username: &str) -> Result<&UserProfile, MastodonError> {
        self.profile
            .as_ref()
            .filter(|p| p.username == username)
            .ok_or_else(|| MastodonError::NotFound(username.to_string()))
    }
}

#[async_trait]
impl MastodonClient for MockMastodonClient {
    async fn fetch_profile(&self, username: &str) -> Result<UserProfile, MastodonError> {
        self.check()?;
        self.find_profile(username).cloned()
    }

    async fn fetch_recent_posts(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<Post>, MastodonError> {
        self.check()?;
        self.find_profile(username)?;
        self.post_limits.write().unwrap().push(limit);
        Ok(self.posts.iter().take(limit as usize).cloned().collect())
    }

    async fn instance_peers(&self) -> Result<Vec<String>, MastodonError> {
        self.check()?;
        Ok(self.peers.clone())
    }

    async fn admin_instances(&self) -> Result<Vec<InstanceInfo>, MastodonError> {
        self.check()?;
        Ok(self.instances.clone())
    }

    async fn admin_reports(&self) -> Result<Vec<AdminReport>, MastodonError> {
        self.check()?;
        Ok(self.admin_reports.clone())
    }

    async fn admin_measures(
        &self,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Result<serde_json::Value, MastodonError> {
        self.check()?;
        *self.measure_window.write().unwrap() = Some((start_at, end_at));
        Ok(serde_json::json!([{"key": "active_users", "total": "42"}]))
    }
}
