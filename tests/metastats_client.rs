//! MetaStatsClient against a local mock of the MetaStats REST API

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::json;
use tokio::net::TcpListener;

use trade_history_gateway::upstream::{MetaStatsClient, TradeSource, UpstreamError};

#[derive(Debug, Clone)]
struct SeenRequest {
    account_id: String,
    start_time: String,
    end_time: String,
    query: HashMap<String, String>,
    token: Option<String>,
}

#[derive(Clone)]
struct MockState {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    status: StatusCode,
    body: serde_json::Value,
}

async fn historical_trades(
    State(state): State<MockState>,
    Path((account_id, start_time, end_time)): Path<(String, String, String)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.seen.lock().unwrap().push(SeenRequest {
        account_id,
        start_time,
        end_time,
        query,
        token: headers
            .get("auth-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    (state.status, Json(state.body.clone()))
}

/// Serve the mock on an ephemeral port and return its base URL
async fn spawn_mock(status: StatusCode, body: serde_json::Value) -> (String, MockState) {
    let state = MockState {
        seen: Arc::new(Mutex::new(Vec::new())),
        status,
        body,
    };
    let app = Router::new()
        .route(
            "/users/current/accounts/{account_id}/historical-trades/{start_time}/{end_time}",
            get(historical_trades),
        )
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn client(base_url: &str) -> MetaStatsClient {
    MetaStatsClient::new(
        base_url,
        SecretString::from("secret-token".to_string()),
        Duration::from_secs(5),
        1000,
    )
    .unwrap()
}

#[tokio::test]
async fn fetches_and_unwraps_trades() {
    let body = json!({ "trades": [{ "_id": "t1", "profit": 10.0, "symbol": "EURUSD" }] });
    let (base, mock) = spawn_mock(StatusCode::OK, body).await;

    let trades = client(&base)
        .get_account_trades(
            "acc-1",
            "2025-01-01 00:00:00.000",
            "2025-01-02 00:00:00.000",
            true,
        )
        .await
        .unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0]["_id"], "t1");
    assert_eq!(trades[0]["profit"], 10.0);

    let seen = mock.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let request = &seen[0];
    assert_eq!(request.account_id, "acc-1");
    assert_eq!(request.start_time, "2025-01-01 00:00:00.000");
    assert_eq!(request.end_time, "2025-01-02 00:00:00.000");
    assert_eq!(request.query.get("updateHistory").map(String::as_str), Some("true"));
    assert_eq!(request.query.get("limit").map(String::as_str), Some("1000"));
    assert_eq!(request.query.get("offset").map(String::as_str), Some("0"));
    assert_eq!(request.token.as_deref(), Some("secret-token"));
}

#[tokio::test]
async fn error_status_carries_upstream_message() {
    let body = json!({
        "id": 1,
        "error": "UnauthorizedError",
        "message": "Authorization token invalid"
    });
    let (base, _mock) = spawn_mock(StatusCode::UNAUTHORIZED, body).await;

    let err = client(&base)
        .get_account_trades("acc-1", "a", "b", true)
        .await
        .unwrap_err();

    match err {
        UpstreamError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Authorization token invalid");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn missing_trades_field_is_decode_error() {
    let (base, _mock) = spawn_mock(StatusCode::OK, json!({ "unexpected": true })).await;

    let err = client(&base)
        .get_account_trades("acc-1", "a", "b", true)
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Decode(_)), "got {}", err);
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .get_account_trades("acc-1", "a", "b", true)
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Transport(_)), "got {}", err);
}
