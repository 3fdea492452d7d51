use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{Extension, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use unisync_core::config::ServiceConfig;
use unisync_core::query::QueryService;
use unisync_core::reconcile::IngestEngine;
use unisync_core::sqlite::SqliteUniversityStore;
use unisync_core::traits::{UniversitySource, UniversityStore};
use unisync_integrations::connectors::HipolabsConnector;

use crate::routes;

#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<IngestEngine>,
    pub query: QueryService,
    pub store: Arc<dyn UniversityStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        ingest: Arc<IngestEngine>,
        query: QueryService,
        store: Arc<dyn UniversityStore>,
    ) -> Self {
        Self {
            ingest,
            query,
            store,
            started_at: Instant::now(),
        }
    }
}

/// Wire the SQLite store and the directory connector into an `AppState`.
///
/// The store lives at `{data_dir}/universities.db`; the caller owns the
/// lifecycle and should `close` the store when done.
#[tracing::instrument(level = "debug", skip_all)]
pub async fn build_state(data_dir: &Path, cfg: &ServiceConfig) -> unisync_core::Result<AppState> {
    let store: Arc<dyn UniversityStore> = Arc::new(
        SqliteUniversityStore::new(data_dir.join("universities.db")).await?,
    );
    let source: Arc<dyn UniversitySource> = Arc::new(HipolabsConnector::new(
        cfg.source_base_url.clone(),
        Duration::from_millis(cfg.fetch_timeout_ms),
    ));

    let ingest = Arc::new(IngestEngine::new(source, store.clone()));
    let query = QueryService::new(store.clone());
    Ok(AppState::new(ingest, query, store))
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(routes::router())
        .layer(Extension(state))
        .layer(SetRequestIdLayer::new(
            axum::http::HeaderName::from_static("x-request-id"),
            MakeRequestUuid,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "unisync server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
