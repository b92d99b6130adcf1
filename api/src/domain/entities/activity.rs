//! Activity summary domain entity
//!
//! Derived entirely from a sequence of posts; never mutated after construction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Coarse estimate of how often a user posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PostingFrequency {
    None,
    Daily,
    Weekly,
    Sporadic,
}

impl PostingFrequency {
    /// Classify from the mean gap between consecutive posts, in days
    pub fn from_average_gap(avg_delta_days: f64) -> Self {
        if avg_delta_days <= 1.5 {
            PostingFrequency::Daily
        } else if avg_delta_days <= 7.0 {
            PostingFrequency::Weekly
        } else {
            PostingFrequency::Sporadic
        }
    }
}

impl std::fmt::Display for PostingFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostingFrequency::None => write!(f, "none"),
            PostingFrequency::Daily => write!(f, "daily"),
            PostingFrequency::Weekly => write!(f, "weekly"),
            PostingFrequency::Sporadic => write!(f, "sporadic"),
        }
    }
}

/// Mean engagement per post
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct AvgEngagement {
    pub favorites: f64,
    pub reblogs: f64,
}

/// Statistical summary of a user's recent activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActivitySummary {
    pub post_count: usize,
    pub avg_engagement: AvgEngagement,
    pub posting_frequency: PostingFrequency,
    /// Lower-cased model label; `null` unless model classification is enabled and succeeded
    pub category: Option<String>,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_boundaries() {
        assert_eq!(
            PostingFrequency::from_average_gap(0.2),
            PostingFrequency::Daily
        );
        assert_eq!(
            PostingFrequency::from_average_gap(1.5),
            PostingFrequency::Daily
        );
        assert_eq!(
            PostingFrequency::from_average_gap(1.51),
            PostingFrequency::Weekly
        );
        assert_eq!(
            PostingFrequency::from_average_gap(7.0),
            PostingFrequency::Weekly
        );
        assert_eq!(
            PostingFrequency::from_average_gap(7.01),
            PostingFrequency::Sporadic
        );
    }

    #[test]
    fn frequency_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PostingFrequency::None).unwrap(),
            r#""none""#
        );
        assert_eq!(PostingFrequency::Weekly.to_string(), "weekly");
    }

    #[test]
    fn absent_category_serializes_as_null() {
        let summary = ActivitySummary {
            post_count: 0,
            avg_engagement: AvgEngagement::default(),
            posting_frequency: PostingFrequency::None,
            category: None,
            summary: "No recent posts.".to_string(),
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value["category"].is_null());
        assert_eq!(value["avg_engagement"]["favorites"], 0.0);
    }
}
