//! Route handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::clock::format_timestamp;
use crate::http::request::ClientRequest;
use crate::http::response::{ErrorDetail, TimestampResponse};
use crate::http::server::AppState;

/// `GET /`: current UTC timestamp and the caller's IP.
pub async fn current_time(
    State(state): State<AppState>,
    request: ClientRequest,
) -> Json<TimestampResponse> {
    let ip = request.client_ip();

    tracing::debug!(ip = ?ip, peer = ?request.peer, "Resolved client address");

    Json(TimestampResponse {
        timestamp: format_timestamp(state.clock.now()),
        ip,
    })
}

/// `GET /healthz`: process liveness only, no dependency checks.
pub async fn healthz() -> Json<&'static str> {
    Json("ok")
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorDetail::not_found()))
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, Json(ErrorDetail::method_not_allowed()))
}
