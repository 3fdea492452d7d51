use std::sync::Arc;

use axum::routing::post;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::AppState;

#[tracing::instrument(level = "debug", skip_all)]
pub fn router() -> axum::Router {
    axum::Router::new().route("/ingest", post(ingest))
}

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub message: String,
    pub count: u64,
    pub dropped: u64,
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn ingest(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let country = req.country.as_deref().map(str::trim).unwrap_or_default();
    if country.is_empty() {
        return Err(ApiError::InvalidInput(
            "country is required in body".to_string(),
        ));
    }

    let report = state.ingest.sync_country(country).await?;
    Ok(Json(IngestResponse {
        message: format!("Ingested {} universities for {country}", report.stored),
        count: report.stored,
        dropped: report.dropped,
    }))
}
