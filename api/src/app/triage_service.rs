//! Report triage service
//!
//! Every report gets a verdict. The model path is an optional enhancement;
//! the rule-based fallback is always available and is the only path when
//! model triage is switched off.

use std::sync::Arc;

use crate::app::gateway::{request_record, to_payload};
use crate::config::FeatureFlags;
use crate::domain::entities::{Report, ReportReason, TriageAction, TriageLevel, TriageResult};
use crate::domain::ports::LanguageModel;
use crate::error::LlmError;

pub const TRIAGE_PROMPT: &str = "You are a moderation assistant. Given this user report, \
estimate severity (low, medium, high), suggest a moderation action (ignore, review, flag_immediately), \
and summarize briefly. Return a JSON object with keys: triage_level, action, summary.";

/// Service for triaging reports
pub struct TriageService<LM>
where
    LM: LanguageModel + ?Sized,
{
    llm: Arc<LM>,
    flags: FeatureFlags,
}

impl<LM> TriageService<LM>
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

    /// Triage `report`. Never fails.
    pub async fn triage(&self, report: &Report) -> TriageResult {
        let reason = normalize_reason(&report.reason);

        if self.flags.llm_triage {
            match self.triage_with_model(report, reason).await {
                Ok(result) => return result,
                Err(e) => {
                    tracing::error!(reason = %reason, error = %e, "LLM triage failed, using rule-based triage")
                }
            }
        }

        fallback_triage(reason)
    }

    async fn triage_with_model(
        &self,
        report: &Report,
        reason: ReportReason,
    ) -> Result<TriageResult, LlmError> {
        let mut payload = to_payload(report)?;
        payload["reason"] = serde_json::Value::from(reason.as_str());
        request_record(self.llm.as_ref(), TRIAGE_PROMPT, &payload).await
    }
}

/// Map a raw reason onto a known one; unknown values become `other`
pub fn normalize_reason(raw: &str) -> ReportReason {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(reason = %raw, "Unknown report reason, treating as other");
        ReportReason::Other
    })
}

/// Rule-based verdict keyed on the normalized reason
pub fn fallback_triage(reason: ReportReason) -> TriageResult {
    let (triage_level, action, summary) = match reason {
        ReportReason::Harassment | ReportReason::Abuse => (
            TriageLevel::High,
            TriageAction::FlagImmediately,
            "Report suggests possible harassment or abuse; prompt review required.",
        ),
        ReportReason::Spam => (
            TriageLevel::Medium,
            TriageAction::Review,
            "Report suggests spam; review recommended.",
        ),
        // TODO: revisit impersonation severity with the moderation team; it is often handled as urgent
        ReportReason::Impersonation | ReportReason::Other => (
            TriageLevel::Low,
            TriageAction::Ignore,
            "Report does not indicate urgent action.",
        ),
    };

    TriageResult {
        triage_level,
        action,
        summary: summary.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_report, MockLanguageModel};

    fn llm_triage_on() -> FeatureFlags {
        FeatureFlags {
            llm_activity: false,
            llm_triage: true,
        }
    }

    fn rules_only() -> TriageService<MockLanguageModel> {
        TriageService::new(Arc::new(MockLanguageModel::new()))
    }

    #[tokio::test]
    async fn harassment_and_abuse_are_flagged_immediately() {
        for reason in ["harassment", "abuse"] {
            let result = rules_only().triage(&test_report(reason)).await;
            assert_eq!(result.triage_level, TriageLevel::High);
            assert_eq!(result.action, TriageAction::FlagImmediately);
            assert!(result.summary.contains("harassment or abuse"));
        }
    }

    #[tokio::test]
    async fn spam_is_reviewed() {
        let result = rules_only().triage(&test_report("spam")).await;
        assert_eq!(result.triage_level, TriageLevel::Medium);
        assert_eq!(result.action, TriageAction::Review);
        assert!(result.summary.contains("spam"));
    }

    #[tokio::test]
    async fn other_reasons_are_ignored() {
        for reason in ["impersonation", "other", "notareason", ""] {
            let result = rules_only().triage(&test_report(reason)).await;
            assert_eq!(result.triage_level, TriageLevel::Low);
            assert_eq!(result.action, TriageAction::Ignore);
            assert!(result.summary.contains("does not indicate urgent action"));
        }
    }

    #[tokio::test]
    async fn model_not_called_when_flag_off() {
        let llm = Arc::new(MockLanguageModel::replying(
            r#"{"triage_level": "low", "action": "ignore", "summary": "model"}"#,
        ));
        let service = TriageService::new(llm.clone());

        let result = service.triage(&test_report("harassment")).await;
        assert_eq!(result.triage_level, TriageLevel::High);
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn model_verdict_is_used_when_valid() {
        let llm = Arc::new(MockLanguageModel::replying(
            r#"{"triage_level": "medium", "action": "review", "summary": "Borderline harassment."}"#,
        ));
        let service = TriageService::new(llm.clone()).with_flags(llm_triage_on());

        let result = service.triage(&test_report("harassment")).await;
        assert_eq!(
            result,
            TriageResult {
                triage_level: TriageLevel::Medium,
                action: TriageAction::Review,
                summary: "Borderline harassment.".to_string(),
            }
        );
        assert_eq!(llm.calls()[0].0, TRIAGE_PROMPT);
    }

    #[tokio::test]
    async fn model_receives_normalized_reason() {
        let llm = Arc::new(MockLanguageModel::replying(
            r#"{"triage_level": "low", "action": "ignore", "summary": "s"}"#,
        ));
        let service = TriageService::new(llm.clone()).with_flags(llm_triage_on());

        service.triage(&test_report("notareason")).await;
        let payload = &llm.calls()[0].1;
        assert_eq!(payload["reason"], "other");
        assert_eq!(payload["username"], "badactor123");
    }

    #[tokio::test]
    async fn model_failures_fall_back_to_rules() {
        let replies = [
            MockLanguageModel::failing(),
            MockLanguageModel::replying("definitely not json"),
            MockLanguageModel::replying(
                r#"{"triage_level": "critical", "action": "ban", "summary": "s"}"#,
            ),
            MockLanguageModel::replying(r#"{"summary": "missing fields"}"#),
        ];

        for llm in replies {
            let service = TriageService::new(Arc::new(llm)).with_flags(llm_triage_on());
            for reason in ["harassment", "abuse", "spam", "impersonation", "other", "bogus"] {
                let expected = fallback_triage(normalize_reason(reason));
                assert_eq!(service.triage(&test_report(reason)).await, expected);
            }
        }
    }

    #[test]
    fn normalize_reason_maps_unknown_to_other() {
        assert_eq!(normalize_reason("spam"), ReportReason::Spam);
        assert_eq!(normalize_reason("Spam"), ReportReason::Other);
        assert_eq!(normalize_reason("notareason"), ReportReason::Other);
    }

    #[test]
    fn fallback_round_trips_through_json() {
        for reason in ReportReason::ALL {
            let result = fallback_triage(reason);
            let json = serde_json::to_string(&result).unwrap();
            let parsed: TriageResult = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, result);
        }
    }
}
