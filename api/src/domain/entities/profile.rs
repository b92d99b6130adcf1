//! User profile domain entity

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Public profile of an account, as sent to the risk evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UserProfile {
    pub username: String,
    pub bio: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub statuses_count: u64,
    pub created_at: DateTime<Utc>,
}
