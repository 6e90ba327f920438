//! HTTP API gateway for GameChat.
//!
//! Exposes the conversational query endpoint, a session reset, and a
//! health check. Sessions are tracked with a cookie and stored in the
//! orchestrator's session store.
//!
//! Built on Axum.

pub mod api;
pub mod session;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{
    Router,
    extract::State,
    response::Json,
    routing::{get, post},
};
use gamechat_agent::{ProviderColumnSummarizer, TurnOrchestrator};
use gamechat_config::AppConfig;
use gamechat_dataset::{GameTable, KeywordRetriever, load_or_generate};
use gamechat_session::InMemorySessionStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::api::{ApiError, api_error};

/// Request bodies above this size are rejected.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub orchestrator: TurnOrchestrator,
    /// Row count of the loaded game table.
    pub rows: usize,
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/query", post(api::query_handler))
        .route("/reset", post(api::reset_handler))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins. `None` when no origin is configured
/// or none of them parse as a header value.
pub fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600)),
    )
}

/// Wire the dataset, provider, summaries, and session store into a
/// ready-to-serve state.
///
/// Column summaries are generated through the provider when the side
/// file does not exist yet, so a first start needs a reachable provider.
pub async fn build_state(config: &AppConfig) -> Result<SharedState, Box<dyn std::error::Error>> {
    let table = Arc::new(GameTable::from_csv_path(&config.dataset.games_csv)?);

    let router = gamechat_providers::router::build_from_config(config)?;
    let provider = router
        .default()
        .ok_or("No default provider configured; set an API key")?;

    let summarizer = ProviderColumnSummarizer::new(provider.clone(), config.model());
    let summaries = load_or_generate(
        &config.dataset.summary_path,
        &table,
        &summarizer,
        config.dataset.sample_size,
    )
    .await?;

    let retriever = Arc::new(KeywordRetriever::new(table.clone(), config.dataset.max_rows));
    let sessions = Arc::new(InMemorySessionStore::with_capacity(config.agent.max_sessions));

    let orchestrator = TurnOrchestrator::new(provider, config.model(), retriever, summaries, sessions)
        .with_temperature(config.default_temperature)
        .with_max_tokens(config.default_max_tokens)
        .with_recent_limit(config.history.recent_limit)
        .with_deferred_retrieval(config.agent.defer_row_retrieval);

    Ok(Arc::new(GatewayState {
        orchestrator,
        rows: table.len(),
    }))
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let state = build_state(&config).await?;

    let mut app = build_router(state);
    if let Some(cors) = cors_layer(&config.gateway.allowed_origins) {
        app = app.layer(cors);
    }

    info!(addr = %addr, model = %config.model(), "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub columns: usize,
    pub rows: usize,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        columns: state.orchestrator.summaries().len(),
        rows: state.rows,
    })
}

async fn not_found_handler() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "Not found.")
}
