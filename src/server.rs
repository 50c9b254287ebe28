use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State as AxumState,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::sync::watch;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::orchestrator::Orchestrator;
use crate::providers::gemini::GeminiClient;
use crate::providers::linkup::LinkupClient;
use crate::providers::mock::FixtureSearchProvider;
use crate::providers::{CompletionProvider, SearchProvider};
use crate::types::ChatRequest;

/// Shared state for the HTTP server. Built once at startup; requests share
/// the provider clients but hold no mutable state between each other.
pub struct AppState {
    pub orchestrator: Orchestrator,
}

impl AppState {
    /// Wire up providers from configuration. Mock mode swaps the search
    /// provider for the fixture reader; the completion provider is real in
    /// both modes so fixture runs still exercise artifact generation.
    pub fn from_config(config: &Config) -> Arc<Self> {
        let search: Arc<dyn SearchProvider> = if config.mock_mode {
            Arc::new(FixtureSearchProvider::new(config.mock_path.clone()))
        } else {
            Arc::new(LinkupClient::new(config.linkup_api_key.clone()))
        };
        let completion: Arc<dyn CompletionProvider> =
            Arc::new(GeminiClient::new(config.gemini_api_key.clone()));

        Arc::new(Self {
            orchestrator: Orchestrator::new(search, completion, config.mock_mode),
        })
    }
}

/// Build the router. Public so integration tests can drive it with fake
/// providers and no socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until the shutdown signal flips.
pub async fn serve(
    addr: SocketAddr,
    state: Arc<AppState>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Idea validation server listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            tracing::info!("Server shutting down");
        })
        .await?;

    Ok(())
}

/// Health check endpoint.
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "service": "ideagauge-server" }))
}

/// POST /api/chat — run the validation workflow and return the combined
/// analysis as `{ "reply": ... }`.
async fn chat(
    AxumState(state): AxumState<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> axum::response::Response {
    match state.orchestrator.validate_idea(&req).await {
        Ok(reply) => (StatusCode::OK, Json(serde_json::json!({ "reply": reply }))).into_response(),
        Err(err) => err.into_response(),
    }
}
