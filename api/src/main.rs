//! Mastodon moderation sub-agent API server
//!
//! Evaluates accounts, summarizes their activity and triages reports for a
//! single Mastodon instance. Uses hexagonal (ports & adapters) architecture:
//! the services only see the `LanguageModel` and `MastodonClient` ports.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{MastodonClientImpl, OpenAiClient};
use app::{ActivityService, AdminService, RiskEvaluationService, TriageService};
use config::Config;
use domain::ports::{LanguageModel, MastodonClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub risk_service: Arc<RiskEvaluationService<dyn LanguageModel>>,
    pub activity_service: Arc<ActivityService<dyn LanguageModel>>,
    pub triage_service: Arc<TriageService<dyn LanguageModel>>,
    pub admin_service: Arc<AdminService<dyn MastodonClient>>,
    pub mastodon: Arc<dyn MastodonClient>,
    pub config: Config,
    pub started_at: Instant,
}

impl AppState {
    /// Wire every service to the given clients
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        mastodon: Arc<dyn MastodonClient>,
        config: Config,
    ) -> Self {
        Self {
            risk_service: Arc::new(RiskEvaluationService::new(llm.clone())),
            activity_service: Arc::new(
                ActivityService::new(llm.clone()).with_flags(config.flags),
            ),
            triage_service: Arc::new(TriageService::new(llm).with_flags(config.flags)),
            admin_service: Arc::new(AdminService::new(mastodon.clone())),
            mastodon,
            config,
            started_at: Instant::now(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Seconds since startup
    uptime: f64,
    instance_id: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.started_at.elapsed().as_secs_f64(),
        instance_id: state.config.instance_id.clone(),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Users
        .route("/api/v1/users/evaluate", post(handlers::evaluate))
        .route("/api/v1/users/evaluate/auto", post(handlers::evaluate_auto))
        .route("/api/v1/users/activity", post(handlers::activity))
        .route("/api/v1/users/activity/auto", post(handlers::activity_auto))
        .route("/api/v1/users/:username/profile", get(handlers::get_profile))
        .route("/api/v1/users/:username/posts", get(handlers::get_posts))
        // Reports
        .route("/api/v1/reports/submit", post(handlers::submit_report))
        // Admin
        .route("/api/v1/admin/peers", get(handlers::peers))
        .route("/api/v1/admin/instances", get(handlers::instances))
        .route(
            "/api/v1/admin/reports/summary",
            get(handlers::reports_summary),
        )
        .route("/api/v1/admin/measures", get(handlers::measures))
        // Discovery
        .route("/schema/functions", get(handlers::functions))
        .route("/schema/capabilities", get(handlers::capabilities))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,submind_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting moderation sub-agent API...");

    // Load configuration
    let config = Config::from_env();
    tracing::info!(
        environment = %config.environment,
        instance_id = %config.instance_id,
        llm_activity = config.flags.llm_activity,
        llm_triage = config.flags.llm_triage,
        "Configuration loaded"
    );
    if config.openai_api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY not set, model calls will fail");
    }
    if config.mastodon_access_token.is_empty() {
        tracing::warn!("MASTODON_ACCESS_TOKEN not set, Mastodon lookups will fail");
    }

    // Create adapters
    let llm: Arc<dyn LanguageModel> = Arc::new(
        OpenAiClient::new(
            config.openai_api_base.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
            config.llm_timeout,
        )
        .context("Failed to build language model client")?,
    );

    let mastodon: Arc<dyn MastodonClient> = Arc::new(
        MastodonClientImpl::new(
            config.mastodon_api_base.clone(),
            config.mastodon_access_token.clone(),
            config.mastodon_timeout,
        )
        .context("Failed to build Mastodon client")?,
    );

    let port = config.port;
    let app = build_router(AppState::new(llm, mastodon, config));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
