//! API response types
//!
//! Successful history responses are the raw upstream trade list. Failures use
//! a single `{"detail": "..."}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::upstream::FetchError;

/// JSON error body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Human-readable cause, the upstream message for fetch failures
    #[schema(example = "MetaStats returned 401: Invalid auth-token")]
    pub detail: String,
}

/// Error returned by handlers
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self::internal(err.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorDetail {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

/// Health check response data
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    /// Git revision the binary was built from
    #[schema(example = "3f2a9c1")]
    pub build: String,
    /// Number of time ranges currently held in the cache
    #[schema(example = 3)]
    pub cached_entries: usize,
}
