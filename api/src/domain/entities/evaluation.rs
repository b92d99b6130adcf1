//! Risk evaluation domain entity

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::ports::ModelReply;

/// Moderation risk verdict for a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RiskEvaluation {
    /// Score in [0.0, 1.0]
    pub risk_score: f64,
    /// Expected "approve", "flag" or "deny"; not enforced
    pub recommendation: String,
    pub summary: String,
}

impl ModelReply for RiskEvaluation {
    fn validate(&self) -> Result<(), String> {
        if !self.risk_score.is_finite() || !(0.0..=1.0).contains(&self.risk_score) {
            return Err(format!(
                "risk_score must be within [0, 1], got {}",
                self.risk_score
            ));
        }
        Ok(())
    }
}
