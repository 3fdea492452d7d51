use axum::Router;

pub mod health;
pub mod ingest;
pub mod universities;

#[tracing::instrument(level = "debug", skip_all)]
pub fn router() -> Router {
    Router::new()
        .merge(ingest::router())
        .merge(universities::router())
        .merge(health::router())
}
