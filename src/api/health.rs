//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub provider: String,
    pub active_callers: usize,
}

/// GET /health - Return service health.
///
/// The provider is never probed, so an unreachable provider still reports
/// healthy: plans degrade to fallback content rather than fail.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        provider: state.provider.clone(),
        active_callers: state.sessions.len(),
    })
}
