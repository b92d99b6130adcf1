//! Admin handlers
//!
//! Read-through views of federation and moderation-queue data.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::domain::entities::{InstanceInfo, ReportSummary};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PeersResponse {
    pub peers: Vec<String>,
}

/// GET /api/v1/admin/peers
pub async fn peers(State(state): State<AppState>) -> Result<Json<PeersResponse>, AppError> {
    let peers = state.admin_service.peers().await?;
    Ok(Json(PeersResponse { peers }))
}

/// GET /api/v1/admin/instances
pub async fn instances(
    State(state): State<AppState>,
) -> Result<Json<Vec<InstanceInfo>>, AppError> {
    Ok(Json(state.admin_service.instances().await?))
}

/// GET /api/v1/admin/reports/summary
pub async fn reports_summary(
    State(state): State<AppState>,
) -> Result<Json<ReportSummary>, AppError> {
    Ok(Json(state.admin_service.report_summary().await?))
}

/// GET /api/v1/admin/measures
pub async fn measures(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(state.admin_service.measures().await?))
}
