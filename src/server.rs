//! HTTP surface: `/api/stats` runs one scan per request.

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::scanner::{ErrorRecord, ScanError, Scanner};

#[derive(Clone)]
pub struct AppState {
    scanner: Scanner,
    cache_control: Option<HeaderValue>,
}

impl AppState {
    pub fn new(scanner: Scanner, config: &ServerConfig) -> Self {
        let cache_control = config.cache_control.as_deref().and_then(|value| match HeaderValue::from_str(value) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(error = %e, value, "Ignoring invalid cache_control header");
                None
            }
        });
        Self { scanner, cache_control }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/stats", get(stats_handler))
        .route("/api/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "Matchup server listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn stats_handler(State(state): State<AppState>) -> Response {
    let scanner = state.scanner.clone();
    let outcome = tokio::task::spawn_blocking(move || scanner.scan())
        .await
        .unwrap_or_else(|e| Err(ScanError::Provider(anyhow::anyhow!("Scan task failed: {e}"))));

    match outcome {
        Ok(found) => {
            let mut response = Json(found).into_response();
            // failures are never cached
            if let Some(value) = state.cache_control {
                response.headers_mut().insert(header::CACHE_CONTROL, value);
            }
            response
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json::<[ErrorRecord; 1]>(e.to_records())).into_response(),
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let provider = if state.scanner.is_available() { "loaded" } else { "unavailable" };
    Json(json!({ "status": "ok", "provider": provider }))
}
