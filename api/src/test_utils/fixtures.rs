//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::{Config, FeatureFlags};
use crate::domain::entities::{Post, Report, UserProfile};

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

/// A typical local account
pub fn test_profile() -> UserProfile {
    UserProfile {
        username: "janedoe".to_string(),
        bio: "Artist and coder. Into open tech.".to_string(),
        follower_count: 120,
        following_count: 85,
        statuses_count: 342,
        created_at: ts("2024-11-10T12:42:00Z"),
    }
}

/// A post at `created_at` with the given engagement counts
pub fn test_post(created_at: &str, favorites: u64, reblogs: u64) -> Post {
    Post {
        content: format!("Post from {}", created_at),
        created_at: ts(created_at),
        favorites,
        reblogs,
    }
}

/// A report against `badactor123` with the given raw reason
pub fn test_report(reason: &str) -> Report {
    Report {
        reporter: "alice".to_string(),
        username: "badactor123".to_string(),
        reason: reason.to_string(),
        comment: Some("This user keeps posting scam links.".to_string()),
        post_excerpt: Some("Click here for free crypto!".to_string()),
        created_at: ts("2025-05-21T14:32:00Z"),
        recent_posts: vec![test_post("2025-05-21T13:00:00Z", 0, 0)],
    }
}

/// Configuration that never reaches a real service
pub fn test_config(flags: FeatureFlags) -> Config {
    Config {
        environment: "test".to_string(),
        instance_id: "test-instance".to_string(),
        openai_api_key: String::new(),
        openai_model: "gpt-3.5-turbo".to_string(),
        openai_api_base: "http://localhost:0/v1".to_string(),
        llm_timeout: Duration::from_secs(1),
        mastodon_access_token: String::new(),
        mastodon_api_base: "https://stranger.social".to_string(),
        mastodon_timeout: Duration::from_secs(1),
        flags,
        port: 0,
    }
}
