use std::sync::Arc;

use axum::extract::Query;
use axum::routing::get;
use axum::{Extension, Json};
use serde::Deserialize;

use unisync_core::models::{University, UniversityFilter};

use crate::error::ApiError;
use crate::server::AppState;

#[tracing::instrument(level = "debug", skip_all)]
pub fn router() -> axum::Router {
    axum::Router::new().route("/universities", get(list_universities))
}

#[derive(Debug, Deserialize)]
pub struct UniversitiesQuery {
    pub country: Option<String>,
    pub state: Option<String>,
}

#[tracing::instrument(level = "debug", skip_all)]
pub async fn list_universities(
    Extension(state): Extension<Arc<AppState>>,
    Query(q): Query<UniversitiesQuery>,
) -> Result<Json<Vec<University>>, ApiError> {
    // Blank query params mean "no filter" (the dashboard sends state=""
    // for its All option).
    let filter = UniversityFilter {
        country: q
            .country
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        state_province: q
            .state
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    let universities = state.query.find_universities(&filter).await?;
    Ok(Json(universities))
}
