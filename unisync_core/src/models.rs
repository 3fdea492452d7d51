use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A university record owned by the store.
///
/// Created (and replaced wholesale) by ingestion runs for its country;
/// read-only to the query side. The serde shape is the wire contract the
/// dashboard consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub name: String,
    /// Reconciliation partition key.
    pub country: String,
    pub state_province: Option<String>,
    pub web_pages: Vec<String>,
    pub domains: Vec<String>,
    pub alpha_two_code: Option<String>,
}

impl University {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        state_province: Option<String>,
        web_pages: Vec<String>,
        domains: Vec<String>,
        alpha_two_code: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument("university name is empty".to_string()));
        }

        let country = country.into();
        if country.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "university country is empty".to_string(),
            ));
        }

        Ok(Self {
            name,
            country,
            state_province: state_province.filter(|s| !s.trim().is_empty()),
            web_pages,
            domains,
            alpha_two_code: alpha_two_code.filter(|s| !s.trim().is_empty()),
        })
    }
}

/// Recognized filter options for [`crate::QueryService::find_universities`].
///
/// Both fields are exact-match; `None` means "don't filter on this". The
/// empty filter matches every stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniversityFilter {
    pub country: Option<String>,
    pub state_province: Option<String>,
}

/// Outcome of one `sync_country` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Records normalized and stored for the country.
    pub stored: u64,
    /// Records dropped because they could not be normalized.
    pub dropped: u64,
}
