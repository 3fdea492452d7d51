use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{University, UniversityFilter};
use crate::traits::UniversityStore;
use crate::Result;

/// In-memory store for local development and unit tests.
///
/// A single mutex guards the whole collection, so `replace_country` is
/// trivially atomic: the delete and insert happen under one lock hold.
#[derive(Clone, Default)]
pub struct MemoryUniversityStore {
    records: Arc<Mutex<Vec<University>>>,
}

impl MemoryUniversityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record in insertion order (primarily for
    /// tests).
    pub async fn all(&self) -> Vec<University> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl UniversityStore for MemoryUniversityStore {
    async fn insert_many(&self, records: &[University]) -> Result<u64> {
        let mut guard = self.records.lock().await;
        guard.extend_from_slice(records);
        Ok(records.len() as u64)
    }

    async fn delete_by_country(&self, country: &str) -> Result<u64> {
        let mut guard = self.records.lock().await;
        let before = guard.len();
        guard.retain(|u| u.country != country);
        Ok((before - guard.len()) as u64)
    }

    async fn replace_country(&self, country: &str, records: &[University]) -> Result<u64> {
        let mut guard = self.records.lock().await;
        guard.retain(|u| u.country != country);
        guard.extend_from_slice(records);
        Ok(records.len() as u64)
    }

    async fn find(&self, filter: &UniversityFilter) -> Result<Vec<University>> {
        let guard = self.records.lock().await;
        let mut out = Vec::new();
        for u in guard.iter() {
            if let Some(country) = &filter.country {
                if &u.country != country {
                    continue;
                }
            }
            if let Some(state) = &filter.state_province {
                if u.state_province.as_deref() != Some(state.as_str()) {
                    continue;
                }
            }
            out.push(u.clone());
        }
        // Stable sort: equal names keep insertion order.
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uni(name: &str, country: &str, state: Option<&str>) -> University {
        University::new(
            name,
            country,
            state.map(str::to_string),
            vec![],
            vec![],
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn find_sorts_by_name_ascending() {
        let store = MemoryUniversityStore::new();
        store
            .insert_many(&[uni("Delhi U", "India", None), uni("Amity U", "India", None)])
            .await
            .unwrap();

        let got = store.find(&UniversityFilter::default()).await.unwrap();
        let names: Vec<&str> = got.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Amity U", "Delhi U"]);
    }

    #[tokio::test]
    async fn find_ties_keep_insertion_order() {
        let store = MemoryUniversityStore::new();
        let first = uni("Same Name", "India", Some("Kerala"));
        let second = uni("Same Name", "India", Some("Gujarat"));
        store
            .insert_many(&[first.clone(), second.clone()])
            .await
            .unwrap();

        let got = store.find(&UniversityFilter::default()).await.unwrap();
        assert_eq!(got, vec![first, second]);
    }

    #[tokio::test]
    async fn find_filters_by_country_and_state() {
        let store = MemoryUniversityStore::new();
        store
            .insert_many(&[
                uni("Amity U", "India", Some("Uttar Pradesh")),
                uni("Gujarat U", "India", Some("Gujarat")),
                uni("MIT", "United States", Some("Massachusetts")),
            ])
            .await
            .unwrap();

        let india = store
            .find(&UniversityFilter {
                country: Some("India".to_string()),
                state_province: None,
            })
            .await
            .unwrap();
        assert_eq!(india.len(), 2);

        let gujarat = store
            .find(&UniversityFilter {
                country: Some("India".to_string()),
                state_province: Some("Gujarat".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(gujarat.len(), 1);
        assert_eq!(gujarat[0].name, "Gujarat U");
    }

    #[tokio::test]
    async fn replace_swaps_only_the_given_country() {
        let store = MemoryUniversityStore::new();
        store
            .insert_many(&[
                uni("Old A", "India", None),
                uni("Old B", "India", None),
                uni("MIT", "United States", None),
            ])
            .await
            .unwrap();

        let replaced = store
            .replace_country("India", &[uni("New A", "India", None)])
            .await
            .unwrap();
        assert_eq!(replaced, 1);

        let all = store.find(&UniversityFilter::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["MIT", "New A"]);
    }

    #[tokio::test]
    async fn delete_by_country_reports_removed_rows() {
        let store = MemoryUniversityStore::new();
        store
            .insert_many(&[uni("A", "India", None), uni("B", "India", None)])
            .await
            .unwrap();
        assert_eq!(store.delete_by_country("India").await.unwrap(), 2);
        assert_eq!(store.delete_by_country("India").await.unwrap(), 0);
    }
}
