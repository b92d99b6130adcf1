//! Profile risk evaluation service
//!
//! Asks the language model for a risk score. There is no rule-based
//! substitute for a risk score, so every gateway failure reaches the caller.

use std::sync::Arc;

use crate::app::gateway::{request_record, to_payload};
use crate::domain::entities::{RiskEvaluation, UserProfile};
use crate::domain::ports::LanguageModel;
use crate::error::LlmError;

pub const RISK_EVALUATION_PROMPT: &str = "You are a content moderation AI. Based on the user profile below, \
estimate a risk score, recommend a moderation action (approve, flag, deny), \
and explain briefly why. Return a JSON object with keys: \
risk_score (float between 0 and 1), recommendation (approve, flag, or deny), \
and summary (a concise explanation).";

/// Service for scoring profiles
pub struct RiskEvaluationService<LM>
where
    LM: LanguageModel + ?Sized,
{
    llm: Arc<LM>,
}

impl<LM> RiskEvaluationService<LM>
where
    LM: LanguageModel + ?Sized,
{
    pub fn new(llm: Arc<LM>) -> Self {
        Self { llm }
    }

    pub async fn evaluate(&self, profile: &UserProfile) -> Result<RiskEvaluation, LlmError> {
        let payload = to_payload(profile)?;
        let evaluation: RiskEvaluation =
            request_record(self.llm.as_ref(), RISK_EVALUATION_PROMPT, &payload)
                .await
                .inspect_err(|e| {
                    tracing::error!(username = %profile.username, error = %e, "Risk evaluation failed")
                })?;

        tracing::debug!(
            username = %profile.username,
            risk_score = evaluation.risk_score,
            recommendation = %evaluation.recommendation,
            "Risk evaluation complete"
        );
        Ok(evaluation)
    }
}
