//! Report handlers

use axum::{extract::State, Json};

use crate::domain::entities::{Report, ReportReason, TriageResult};
use crate::error::AppError;
use crate::handlers::extract::ValidJson;
use crate::AppState;

/// POST /api/v1/reports/submit
///
/// Rejects reasons outside the known set before triage runs.
pub async fn submit_report(
    State(state): State<AppState>,
    ValidJson(report): ValidJson<Report>,
) -> Result<Json<TriageResult>, AppError> {
    report
        .reason
        .parse::<ReportReason>()
        .map_err(AppError::Validation)?;

    tracing::info!(
        "Triaging report from {} against {} ({})",
        report.reporter,
        report.username,
        report.reason
    );
    Ok(Json(state.triage_service.triage(&report).await))
}
