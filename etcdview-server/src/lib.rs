//! HTTP surface of the etcdview admin console.
//!
//! A thin proxy over the store gateway:
//! - `GET /api/kv?prefix=` lists entries under a prefix
//! - `PUT /api/kv` creates or overwrites one key
//! - `DELETE /api/kv/{key}` removes one key (path is URL-encoded)
//! - `GET /api/status` reports the configured endpoint and reachability
//!
//! Validation failures answer 400 with `Key is required`; store failures
//! answer 502 (500 for delete) carrying the underlying message. A put whose
//! confirmation read failed keeps its distinct "may have applied" message so
//! clients can tell it apart from a clean failure.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use etcdview_gateway::{GatewayError, StoreGateway};
use etcdview_types::{ConnectionStatus, Entry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Shared handler state: the gateway plus what the status line reports.
pub struct AppState {
    pub gateway: Arc<dyn StoreGateway>,
    /// Primary store endpoint, for the status endpoint.
    pub endpoint: String,
}

impl AppState {
    pub fn new(gateway: Arc<dyn StoreGateway>, endpoint: impl Into<String>) -> Self {
        Self {
            gateway,
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Deserialize)]
struct ListQuery {
    prefix: Option<String>,
}

#[derive(Serialize)]
struct ListBody {
    items: Vec<Entry>,
}

#[derive(Serialize)]
struct ItemBody {
    item: Entry,
}

#[derive(Serialize)]
struct OkBody {
    ok: bool,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct PutRequest {
    #[serde(default)]
    key: String,
    #[serde(default)]
    value: String,
}

fn error_response(err: &GatewayError, fallback: StatusCode) -> Response {
    let status = match err {
        GatewayError::KeyRequired => StatusCode::BAD_REQUEST,
        _ => fallback,
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}

async fn list_keys(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    let prefix = query.prefix.unwrap_or_default();
    match state.gateway.list(&prefix).await {
        Ok(items) => (StatusCode::OK, Json(ListBody { items })).into_response(),
        Err(err) => {
            error!("GET /api/kv failed: {err}");
            error_response(&err, StatusCode::BAD_GATEWAY)
        }
    }
}

async fn put_key(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PutRequest>,
) -> Response {
    match state.gateway.put(&request.key, &request.value).await {
        Ok(item) => (StatusCode::OK, Json(ItemBody { item })).into_response(),
        Err(err) => {
            error!("PUT /api/kv failed: {err}");
            error_response(&err, StatusCode::BAD_GATEWAY)
        }
    }
}

async fn delete_key(State(state): State<Arc<AppState>>, Path(key): Path<String>) -> Response {
    match state.gateway.delete(&key).await {
        Ok(()) => (StatusCode::OK, Json(OkBody { ok: true })).into_response(),
        Err(err) => {
            error!("DELETE /api/kv failed: {err}");
            error_response(&err, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// `DELETE /api/kv` without a key segment: same validation answer as an
/// empty key.
async fn delete_without_key() -> Response {
    error_response(&GatewayError::KeyRequired, StatusCode::BAD_REQUEST)
}

async fn status(State(state): State<Arc<AppState>>) -> Json<ConnectionStatus> {
    // A single-key read is the cheapest liveness probe the gateway offers.
    let connected = state.gateway.get("/").await.is_ok();
    Json(ConnectionStatus {
        connected,
        endpoint: state.endpoint.clone(),
    })
}

/// Builds the console's router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/kv",
            get(list_keys).put(put_key).delete(delete_without_key),
        )
        .route("/api/kv/{*key}", delete(delete_key))
        .route("/api/status", get(status))
        .with_state(state)
}
