//! Domain entities
//!
//! Immutable value records created per request and discarded afterwards.
//! Nothing here is persisted.

pub mod activity;
pub mod admin;
pub mod evaluation;
pub mod post;
pub mod profile;
pub mod report;

pub use activity::{ActivitySummary, AvgEngagement, PostingFrequency};
pub use admin::{AdminReport, InstanceInfo, ReportSummary};
pub use evaluation::RiskEvaluation;
pub use post::Post;
pub use profile::UserProfile;
pub use report::{Report, ReportReason, TriageAction, TriageLevel, TriageResult};
