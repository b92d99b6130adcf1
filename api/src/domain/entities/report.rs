//! Report domain entities
//!
//! A user/content report as submitted by a moderator or member, and the
//! triage verdict produced for it.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Post;
use crate::domain::ports::ModelReply;

/// Known report reasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Abuse,
    Spam,
    Harassment,
    Impersonation,
    Other,
}

impl ReportReason {
    pub const ALL: [ReportReason; 5] = [
        ReportReason::Abuse,
        ReportReason::Spam,
        ReportReason::Harassment,
        ReportReason::Impersonation,
        ReportReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Abuse => "abuse",
            ReportReason::Spam => "spam",
            ReportReason::Harassment => "harassment",
            ReportReason::Impersonation => "impersonation",
            ReportReason::Other => "other",
        }
    }
}

impl std::fmt::Display for ReportReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportReason::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown report reason: {}. Use: abuse, spam, harassment, impersonation, other",
                    s
                )
            })
    }
}

/// A report about an account
///
/// `reason` is kept as the raw submitted string; the triage engine
/// normalizes unknown values to `other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    pub reporter: String,
    /// The reported account
    pub username: String,
    pub reason: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub post_excerpt: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub recent_posts: Vec<Post>,
}

/// Severity assigned to a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TriageLevel {
    Low,
    Medium,
    High,
}

/// Recommended moderation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TriageAction {
    Ignore,
    Review,
    FlagImmediately,
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriageLevel::Low => write!(f, "low"),
            TriageLevel::Medium => write!(f, "medium"),
            TriageLevel::High => write!(f, "high"),
        }
    }
}

impl std::fmt::Display for TriageAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriageAction::Ignore => write!(f, "ignore"),
            TriageAction::Review => write!(f, "review"),
            TriageAction::FlagImmediately => write!(f, "flag_immediately"),
        }
    }
}

/// Triage verdict for a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TriageResult {
    pub triage_level: TriageLevel,
    pub action: TriageAction,
    pub summary: String,
}

// Enum decoding already restricts level and action.
impl ModelReply for TriageResult {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_from_str() {
        assert_eq!(
            "harassment".parse::<ReportReason>().unwrap(),
            ReportReason::Harassment
        );
        assert_eq!(
            "impersonation".parse::<ReportReason>().unwrap(),
            ReportReason::Impersonation
        );
        assert!("notareason".parse::<ReportReason>().is_err());
        assert!("SPAM".parse::<ReportReason>().is_err());
    }

    #[test]
    fn reason_display_round_trips() {
        for reason in ReportReason::ALL {
            assert_eq!(reason.to_string().parse::<ReportReason>().unwrap(), reason);
        }
    }

    #[test]
    fn report_defaults_optional_fields() {
        let json = r#"{
            "reporter": "alice",
            "username": "badactor123",
            "reason": "spam",
            "created_at": "2025-05-21T14:32:00Z"
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.comment, None);
        assert_eq!(report.post_excerpt, None);
        assert!(report.recent_posts.is_empty());
    }

    #[test]
    fn triage_result_wire_shape() {
        let result = TriageResult {
            triage_level: TriageLevel::High,
            action: TriageAction::FlagImmediately,
            summary: "s".to_string(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"triage_level":"high","action":"flag_immediately","summary":"s"}"#
        );
        let parsed: TriageResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn triage_result_rejects_unknown_level() {
        let json = r#"{"triage_level":"critical","action":"review","summary":"s"}"#;
        assert!(serde_json::from_str::<TriageResult>(json).is_err());
    }
}
