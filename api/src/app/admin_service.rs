//! Admin service
//!
//! Read-through access to federation and moderation-queue data. Upstream
//! failures are logged and reported to the caller as a single gateway error.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::{InstanceInfo, ReportSummary};
use crate::domain::ports::MastodonClient;
use crate::error::{AppError, MastodonError};

/// Service for instance-level admin views
pub struct AdminService<MC>
where
    MC: MastodonClient + ?Sized,
{
    mastodon: Arc<MC>,
}

impl<MC> AdminService<MC>
where
    MC: MastodonClient + ?Sized,
{
    pub fn new(mastodon: Arc<MC>) -> Self {
        Self { mastodon }
    }

    pub async fn peers(&self) -> Result<Vec<String>, AppError> {
        self.mastodon
            .instance_peers()
            .await
            .map_err(|e| upstream("peers", e))
    }

    pub async fn instances(&self) -> Result<Vec<InstanceInfo>, AppError> {
        self.mastodon
            .admin_instances()
            .await
            .map_err(|e| upstream("instances", e))
    }

    pub async fn report_summary(&self) -> Result<ReportSummary, AppError> {
        let reports = self
            .mastodon
            .admin_reports()
            .await
            .map_err(|e| upstream("report summary", e))?;
        Ok(ReportSummary::from_reports(&reports))
    }

    /// System measures for the last 24 hours
    pub async fn measures(&self) -> Result<serde_json::Value, AppError> {
        let end_at = Utc::now();
        let start_at = end_at - Duration::days(1);
        self.mastodon
            .admin_measures(start_at, end_at)
            .await
            .map_err(|e| upstream("system measures", e))
    }
}

fn upstream(what: &str, e: MastodonError) -> AppError {
    tracing::error!(error = %e, "Error fetching {}", what);
    AppError::Upstream(format!("Failed to fetch {}", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AdminReport;
    use crate::test_utils::MockMastodonClient;

    #[tokio::test]
    async fn peers_pass_through() {
        let mastodon = MockMastodonClient::new()
            .with_peers(vec!["mastodon.social".to_string(), "hachyderm.io".to_string()]);
        let service = AdminService::new(Arc::new(mastodon));

        let peers = service.peers().await.unwrap();
        assert_eq!(peers, vec!["mastodon.social", "hachyderm.io"]);
    }

    #[tokio::test]
    async fn report_summary_aggregates_queue() {
        let mastodon = MockMastodonClient::new().with_admin_reports(vec![
            AdminReport {
                resolved: false,
                category: Some("spam".to_string()),
                created_at: Some("2025-05-25T17:04:00Z".to_string()),
            },
            AdminReport {
                resolved: true,
                category: Some("violation".to_string()),
                created_at: Some("2025-05-01T10:00:00Z".to_string()),
            },
        ]);
        let service = AdminService::new(Arc::new(mastodon));

        let summary = service.report_summary().await.unwrap();
        assert_eq!(summary.open_reports, 1);
        assert_eq!(summary.resolved_reports, 1);
        assert_eq!(summary.spam_related, 1);
        assert_eq!(summary.harassment_related, 0);
        assert_eq!(
            summary.latest_report_ts.as_deref(),
            Some("2025-05-25T17:04:00Z")
        );
    }

    #[tokio::test]
    async fn measures_cover_last_day() {
        let mastodon = Arc::new(MockMastodonClient::new());
        let service = AdminService::new(mastodon.clone());

        service.measures().await.unwrap();

        let (start_at, end_at) = mastodon.measure_window().unwrap();
        assert_eq!(end_at - start_at, Duration::days(1));
    }

    #[tokio::test]
    async fn upstream_failures_become_gateway_errors() {
        let service = AdminService::new(Arc::new(MockMastodonClient::failing()));

        match service.instances().await {
            Err(AppError::Upstream(msg)) => assert_eq!(msg, "Failed to fetch instances"),
            other => panic!("Expected upstream error, got {:?}", other),
        }
        assert!(matches!(
            service.report_summary().await,
            Err(AppError::Upstream(_))
        ));
        assert!(matches!(service.peers().await, Err(AppError::Upstream(_))));
        assert!(matches!(service.measures().await, Err(AppError::Upstream(_))));
    }
}
