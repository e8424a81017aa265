//! Health check handlers
//!
//! Liveness endpoints; they never call the upstream API

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

static STARTED_AT: Lazy<Instant> = Lazy::new(Instant::now);

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDetails {
    /// Upstream base URL requests are proxied to
    pub upstream: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Record the process start time; uptime is measured from the first call
pub fn mark_started() {
    Lazy::force(&STARTED_AT);
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");
    Json(build_response("healthy", &state))
}

/// Liveness check
///
/// GET /health/live
pub async fn liveness_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing liveness check");
    Json(build_response("alive", &state))
}

fn build_response(status: &str, state: &AppState) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            upstream: state.api.base_url.clone(),
            uptime_seconds: get_uptime_seconds(),
        }),
    }
}

/// Get service uptime in seconds
fn get_uptime_seconds() -> u64 {
    STARTED_AT.elapsed().as_secs()
}
