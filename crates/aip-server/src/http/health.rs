// SPDX-License-Identifier: Apache-2.0

use crate::{AppState, CRATE_NAME};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::atomic::Ordering;

pub(crate) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": CRATE_NAME,
        "caseStore": state.store.backend_tag(),
    }))
}

pub(crate) async fn liveness_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Readiness only asserts the process is wired up; the case store is probed
/// lazily on first use, so a slow dependency never wedges rollout. Once
/// shutdown begins this answers 503 so the load balancer stops routing here
/// while in-flight requests drain.
pub(crate) async fn readiness_handler(State(state): State<AppState>) -> impl IntoResponse {
    if !state.accepting_requests.load(Ordering::Relaxed) {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "draining" })),
        )
            .into_response();
    }
    Json(json!({
        "status": "ready",
        "caseStore": state.store.backend_tag(),
    }))
    .into_response()
}
