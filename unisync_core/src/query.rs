use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{University, UniversityFilter};
use crate::traits::UniversityStore;
use crate::Result;

/// Read side of the service: filtered lookups over the store plus the
/// faceting derivation the dashboard uses to build its state dropdown.
///
/// Queries never take the ingestion lock; an overlapping reader observes
/// the pre- or post-sync snapshot of a partition, never a mix.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn UniversityStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn UniversityStore>) -> Self {
        Self { store }
    }

    /// Matching records sorted by name ascending. The empty filter
    /// returns everything.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn find_universities(&self, filter: &UniversityFilter) -> Result<Vec<University>> {
        self.store.find(filter).await
    }
}

/// Distinct non-empty `state_province` values in first-occurrence order.
///
/// Omitted and blank values are "no value" and never show up as a facet.
/// First-occurrence ordering keeps the dropdown stable across renders.
pub fn distinct_states(universities: &[University]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for u in universities {
        let Some(state) = u
            .state_province
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            continue;
        };
        if seen.insert(state.to_string()) {
            out.push(state.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryUniversityStore;

    fn uni(name: &str, state: Option<&str>) -> University {
        University::new(
            name,
            "India",
            state.map(str::to_string),
            vec![],
            vec![],
            None,
        )
        .unwrap()
    }

    #[test]
    fn distinct_states_dedupes_in_first_occurrence_order() {
        let set = vec![
            uni("A", Some("Gujarat")),
            uni("B", None),
            uni("C", Some("Gujarat")),
            uni("D", Some("Kerala")),
        ];
        assert_eq!(distinct_states(&set), vec!["Gujarat", "Kerala"]);
    }

    #[test]
    fn distinct_states_skips_blank_values() {
        let set = vec![uni("A", Some("  ")), uni("B", Some(""))];
        assert!(distinct_states(&set).is_empty());
    }

    #[test]
    fn distinct_states_of_nothing_is_empty() {
        assert!(distinct_states(&[]).is_empty());
    }

    #[tokio::test]
    async fn empty_filter_returns_every_stored_record() {
        let store = Arc::new(MemoryUniversityStore::new());
        store
            .insert_many(&[
                University::new("Amity U", "India", None, vec![], vec![], None).unwrap(),
                University::new("MIT", "United States", None, vec![], vec![], None).unwrap(),
            ])
            .await
            .unwrap();
        let query = QueryService::new(store);

        let all = query
            .find_universities(&UniversityFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }
}
