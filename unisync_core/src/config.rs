use crate::{Error, Result};

/// Runtime configuration for the ingestion-and-query service.
///
/// The store location is a deployment concern and comes from the CLI
/// (`--data-dir`); everything about the external directory lives here.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the external university directory.
    pub source_base_url: String,

    /// External fetch timeout. A timed-out fetch fails the whole sync run
    /// before any store mutation.
    pub fetch_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            source_base_url: "http://universities.hipolabs.com".to_string(),
            fetch_timeout_ms: 20_000,
        }
    }
}

impl ServiceConfig {
    /// Load from `UNISYNC_*` env vars, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            source_base_url: std::env::var("UNISYNC_SOURCE_BASE_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.source_base_url),
            fetch_timeout_ms: std::env::var("UNISYNC_FETCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fetch_timeout_ms),
        }
    }

    #[tracing::instrument(level = "debug")]
    pub fn validate(&self) -> Result<()> {
        if self.source_base_url.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "source_base_url is empty".to_string(),
            ));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(Error::InvalidArgument(
                "fetch_timeout_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        ServiceConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = ServiceConfig {
            fetch_timeout_ms: 0,
            ..ServiceConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
