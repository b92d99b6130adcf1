//! Post domain entity

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single status from a user's timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Post {
    /// Raw content, may contain HTML markup
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub favorites: u64,
    pub reblogs: u64,
}
