//! Activity classification service
//!
//! Summarizes engagement and posting frequency from a list of posts. The
//! optional model label is supplementary: if the model fails the summary is
//! still returned, just without a category.

use std::sync::Arc;

use crate::app::gateway::to_payload;
use crate::config::FeatureFlags;
use crate::domain::entities::{ActivitySummary, AvgEngagement, Post, PostingFrequency};
use crate::domain::ports::LanguageModel;
use crate::error::LlmError;

pub const ACTIVITY_CLASSIFICATION_PROMPT: &str = "You are an expert in social media analysis. \
Given a user's recent posts, classify their activity pattern with a single label such as \
'engaged community member', 'low-effort spammer', or 'new quiet user'. Respond with only the label.";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Service for summarizing user activity
pub struct ActivityService<LM>
where
    LM: LanguageModel + ?Sized,
{
    llm: Arc<LM>,
    flags: FeatureFlags,
}

impl<LM> ActivityService<LM>
where
    LM: LanguageModel + ?Sized,
{
    pub fn new(llm: Arc<LM>) -> Self {
        Self {
            llm,
            flags: FeatureFlags::default(),
        }
    }

    pub fn with_flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Summarize `posts`. Never fails.
    pub async fn analyze(&self, posts: &[Post]) -> ActivitySummary {
        let mut summary = summarize_posts(posts);

        if !posts.is_empty() && self.flags.llm_activity {
            match self.classify(posts).await {
                Ok(category) => summary.category = category,
                Err(e) => {
                    tracing::warn!(error = %e, "Activity classification unavailable, omitting category")
                }
            }
        }

        summary
    }

    async fn classify(&self, posts: &[Post]) -> Result<Option<String>, LlmError> {
        let payload = to_payload(posts)?;
        let label = self
            .llm
            .complete(ACTIVITY_CLASSIFICATION_PROMPT, &payload)
            .await?;

        let label = label.trim().to_lowercase();
        Ok((!label.is_empty()).then_some(label))
    }
}

/// Statistical part of the summary, without the model label
pub fn summarize_posts(posts: &[Post]) -> ActivitySummary {
    if posts.is_empty() {
        return ActivitySummary {
            post_count: 0,
            avg_engagement: AvgEngagement::default(),
            posting_frequency: PostingFrequency::None,
            category: None,
            summary: "No recent posts.".to_string(),
        };
    }

    let count = posts.len() as f64;
    let avg_engagement = AvgEngagement {
        favorites: posts.iter().map(|p| p.favorites as f64).sum::<f64>() / count,
        reblogs: posts.iter().map(|p| p.reblogs as f64).sum::<f64>() / count,
    };

    let posting_frequency = match average_gap_days(posts) {
        Some(avg_delta) => PostingFrequency::from_average_gap(avg_delta),
        None => PostingFrequency::Sporadic,
    };

    ActivitySummary {
        post_count: posts.len(),
        avg_engagement,
        posting_frequency,
        category: None,
        summary: format!("User posts {} with positive engagement.", posting_frequency),
    }
}

/// Mean gap in days between consecutive posts, newest first.
/// `None` with fewer than two posts.
fn average_gap_days(posts: &[Post]) -> Option<f64> {
    if posts.len() < 2 {
        return None;
    }

    let mut dates: Vec<_> = posts.iter().map(|p| p.created_at).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let total: f64 = dates
        .windows(2)
        .map(|pair| (pair[0] - pair[1]).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY)
        .sum();

    Some(total / (dates.len() - 1) as f64)
}
