use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::models::IngestReport;
use crate::normalize;
use crate::traits::{UniversitySource, UniversityStore};
use crate::{Error, Result};

/// Brings the store's view of one country in line with the latest external
/// snapshot.
///
/// Reconciliation policy is full replace: the external directory is
/// authoritative and small per country, so each run deletes the country
/// partition and re-inserts the fetched snapshot instead of diffing.
/// Re-running a sync is therefore always safe.
pub struct IngestEngine {
    source: Arc<dyn UniversitySource>,
    store: Arc<dyn UniversityStore>,
    country_locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl IngestEngine {
    pub fn new(source: Arc<dyn UniversitySource>, store: Arc<dyn UniversityStore>) -> Self {
        Self {
            source,
            store,
            country_locks: RwLock::new(HashMap::new()),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn country_lock(&self, country: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.country_locks.read().await.get(country) {
            return lock.clone();
        }
        let mut locks = self.country_locks.write().await;
        locks
            .entry(country.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Synchronize one country partition with the external directory.
    ///
    /// Fails with `InvalidArgument` before any I/O when `country` is
    /// blank; with `SourceUnavailable` when the fetch fails (the store is
    /// untouched in that case); with `Storage` when persistence fails.
    #[tracing::instrument(level = "info", skip(self))]
    pub async fn sync_country(&self, country: &str) -> Result<IngestReport> {
        let country = country.trim();
        if country.is_empty() {
            return Err(Error::InvalidArgument("country is empty".to_string()));
        }

        // Two runs for the same country must not interleave their
        // delete/insert pairs: a stale delete landing after a newer insert
        // silently erases the newer snapshot. Runs for different countries
        // share nothing and proceed concurrently.
        let lock = self.country_lock(country).await;
        let _guard = lock.lock().await;

        // The fetch completes (and validates) before the replace starts,
        // so a timeout here leaves the partition untouched.
        let raw = self.source.fetch_country(country).await?;
        let fetched = raw.len();

        let mut records = Vec::with_capacity(raw.len());
        let mut dropped = 0u64;
        for r in &raw {
            match normalize::normalize(r) {
                Ok(u) => records.push(u),
                Err(e) => {
                    dropped += 1;
                    tracing::debug!(country, error = %e, "dropping malformed record");
                }
            }
        }

        let stored = self.store.replace_country(country, &records).await?;
        tracing::info!(country, fetched, stored, dropped, "country snapshot replaced");
        Ok(IngestReport { stored, dropped })
    }
}
