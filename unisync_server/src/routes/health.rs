use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Json};
use serde::Serialize;

use crate::server::AppState;

pub fn router() -> axum::Router {
    axum::Router::new().route("/health", get(get_health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_ms: u128,
}

#[tracing::instrument(level = "debug", skip_all)]
pub async fn get_health(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_ms: state.started_at.elapsed().as_millis(),
    })
}
