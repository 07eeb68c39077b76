//! Trade history handler

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::super::state::AppState;
use super::super::types::ApiError;
use crate::upstream::TradeList;

/// Query window. Both bounds are optional, free-form strings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Start of the window, `YYYY-MM-DD HH:MM:SS.mmm`. Defaults to the
    /// beginning of the account history.
    #[param(example = "2025-01-01 00:00:00.000")]
    pub start_time: Option<String>,
    /// End of the window. Defaults to the current UTC time.
    #[param(example = "2025-01-02 00:00:00.000")]
    pub end_time: Option<String>,
}

/// Account trade history
///
/// Proxies MetaStats `historical-trades` for the configured account. Results
/// are cached per `(start_time, end_time)` for the configured TTL.
#[utoipa::path(
    get,
    path = "/",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Array of trade records as returned by MetaStats", content_type = "application/json"),
        (status = 500, description = "Upstream failure", body = crate::gateway::types::ErrorDetail)
    ),
    tag = "History"
)]
pub async fn trading_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Arc<TradeList>>, ApiError> {
    let trades = state
        .history
        .get_history(query.start_time.as_deref(), query.end_time.as_deref())
        .await?;
    Ok(Json(trades))
}
