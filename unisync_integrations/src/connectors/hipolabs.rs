//! Universities directory connector.
//!
//! Pulls country-scoped snapshots from the public Hipolabs search API.
//! Records come back loosely typed; normalization happens in the core.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use unisync_core::normalize::RawUniversity;
use unisync_core::traits::UniversitySource;
use unisync_core::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://universities.hipolabs.com";

#[derive(Clone)]
pub struct HipolabsConnector {
    client: Client,
    base_url: String,
}

impl HipolabsConnector {
    /// Build a connector against `base_url` with a per-request timeout.
    ///
    /// The base URL is injectable so tests and mirrors can point the
    /// connector elsewhere.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl UniversitySource for HipolabsConnector {
    #[instrument(level = "info", skip(self))]
    async fn fetch_country(&self, country: &str) -> Result<Vec<RawUniversity>> {
        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("country", country)])
            .send()
            .await
            .map_err(|e| Error::source_unavailable("universities search request", e))?
            .error_for_status()
            .map_err(|e| Error::source_unavailable("universities search status", e))?;

        let records: Vec<RawUniversity> = resp
            .json()
            .await
            .map_err(|e| Error::source_unavailable("decode universities response", e))?;

        tracing::debug!(country, count = records.len(), "fetched country snapshot");
        Ok(records)
    }
}
