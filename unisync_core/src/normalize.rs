//! Mapping from loosely-typed external records to the canonical entity.
//!
//! The upstream directory's schema is not stable: key spellings drift
//! between hyphenated, snake_case and camelCase variants. All field access
//! goes through lookup-with-fallback over the known spellings, never
//! through direct map indexing at call sites.

use serde::Deserialize;
use serde_json::Value;

use crate::models::University;
use crate::{Error, Result};

const NAME_KEYS: &[&str] = &["name"];
const COUNTRY_KEYS: &[&str] = &["country"];
const STATE_KEYS: &[&str] = &["state-province", "state_province", "stateProvince"];
const WEB_PAGE_KEYS: &[&str] = &["web_pages", "web-pages", "webPages"];
const DOMAIN_KEYS: &[&str] = &["domains"];
const ALPHA_TWO_KEYS: &[&str] = &["alpha_two_code", "alpha-two-code", "alphaTwoCode"];

/// One university record as returned by the external directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawUniversity(Value);

impl RawUniversity {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    fn get(&self, keys: &[&str]) -> Option<&Value> {
        let obj = self.0.as_object()?;
        keys.iter().find_map(|k| obj.get(*k))
    }

    /// First non-blank string value under any of the given key spellings.
    fn text(&self, keys: &[&str]) -> Option<&str> {
        self.get(keys)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// String-array value under any of the given key spellings; non-string
    /// elements are skipped. Missing key resolves to the empty sequence.
    fn text_list(&self, keys: &[&str]) -> Vec<String> {
        let Some(items) = self.get(keys).and_then(Value::as_array) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    }
}

/// Map one external record to a canonical [`University`].
///
/// A record without a resolvable name or country is rejected with
/// [`Error::MalformedRecord`]; the caller drops it and moves on. Optional
/// fields default to absent, sequences to empty. Pure; no I/O.
pub fn normalize(raw: &RawUniversity) -> Result<University> {
    let name = raw
        .text(NAME_KEYS)
        .ok_or_else(|| Error::MalformedRecord("no resolvable name".to_string()))?;
    let country = raw
        .text(COUNTRY_KEYS)
        .ok_or_else(|| Error::MalformedRecord("no resolvable country".to_string()))?;

    University::new(
        name,
        country,
        raw.text(STATE_KEYS).map(str::to_string),
        raw.text_list(WEB_PAGE_KEYS),
        raw.text_list(DOMAIN_KEYS),
        raw.text(ALPHA_TWO_KEYS).map(str::to_string),
    )
}
