//! Health check handler

use std::sync::Arc;

use axum::{Json, extract::State};

use super::super::state::AppState;
use super::super::types::HealthResponse;

/// Git revision captured by build.rs
pub const BUILD: &str = env!("GIT_HASH");

/// Health check endpoint
///
/// Does not call upstream; a healthy gateway may still fail to reach MetaStats.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json")
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        build: BUILD.to_string(),
        cached_entries: state.history.cache().len(),
    })
}
