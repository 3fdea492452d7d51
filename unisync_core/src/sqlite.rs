//! SQLite-backed UniversityStore implementation.
//!
//! Designed for single-node deployments: one WAL-mode file holds the whole
//! directory, and the delete-then-insert replacement of a country partition
//! runs inside a single transaction so readers never observe a torn mix of
//! old and new snapshots.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool, Transaction};

use crate::models::{University, UniversityFilter};
use crate::traits::UniversityStore;
use crate::{Error, Result};

#[derive(Clone)]
pub struct SqliteUniversityStore {
    pool: SqlitePool,
}

impl SqliteUniversityStore {
    /// Open (or create) the store at the given file path.
    ///
    /// Creates parent directories if needed and runs the schema migration
    /// on startup.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::backend("sqlite_university_store mkdir", e))?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))
            .map_err(|e| Error::backend("sqlite_university_store connect options", e))?
            .journal_mode(SqliteJournalMode::Wal)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        Ok(Self { pool })
    }
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS universities (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,
  country TEXT NOT NULL,
  state_province TEXT NULL,
  web_pages_json TEXT NOT NULL,
  domains_json TEXT NOT NULL,
  alpha_two_code TEXT NULL
);
CREATE INDEX IF NOT EXISTS universities_country_idx
  ON universities(country);
CREATE INDEX IF NOT EXISTS universities_country_state_idx
  ON universities(country, state_province);
"#;

#[async_trait]
impl UniversityStore for SqliteUniversityStore {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn insert_many(&self, records: &[University]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let inserted = insert_records(&mut tx, records).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_by_country(&self, country: &str) -> Result<u64> {
        let res = sqlx::query("DELETE FROM universities WHERE country = ?1")
            .bind(country)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    #[tracing::instrument(level = "debug", skip(self, records))]
    async fn replace_country(&self, country: &str, records: &[University]) -> Result<u64> {
        // One transaction for the delete-then-insert pair: a concurrent
        // reader sees the old partition or the new one, never both.
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM universities WHERE country = ?1")
            .bind(country)
            .execute(&mut *tx)
            .await?;
        let inserted = insert_records(&mut tx, records).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn find(&self, filter: &UniversityFilter) -> Result<Vec<University>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT name, country, state_province, web_pages_json, domains_json, alpha_two_code \
             FROM universities WHERE 1 = 1",
        );
        if let Some(country) = &filter.country {
            qb.push(" AND country = ");
            qb.push_bind(country);
        }
        if let Some(state) = &filter.state_province {
            qb.push(" AND state_province = ");
            qb.push_bind(state);
        }
        // `id` carries insertion order, so equal names tie-break stably.
        qb.push(" ORDER BY name ASC, id ASC");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_university).collect()
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn close(&self) {
        self.pool.close().await;
    }
}

async fn insert_records(
    tx: &mut Transaction<'_, Sqlite>,
    records: &[University],
) -> Result<u64> {
    let mut inserted = 0u64;
    for u in records {
        let web_pages_json = serde_json::to_string(&u.web_pages)
            .map_err(|e| Error::backend("serialize web_pages", e))?;
        let domains_json = serde_json::to_string(&u.domains)
            .map_err(|e| Error::backend("serialize domains", e))?;

        sqlx::query(
            r#"
INSERT INTO universities
  (name, country, state_province, web_pages_json, domains_json, alpha_two_code)
VALUES
  (?1, ?2, ?3, ?4, ?5, ?6)
"#,
        )
        .bind(&u.name)
        .bind(&u.country)
        .bind(&u.state_province)
        .bind(web_pages_json)
        .bind(domains_json)
        .bind(&u.alpha_two_code)
        .execute(&mut **tx)
        .await?;
        inserted += 1;
    }
    Ok(inserted)
}

fn row_to_university(row: &SqliteRow) -> Result<University> {
    let web_pages_json: String = row.get("web_pages_json");
    let domains_json: String = row.get("domains_json");

    Ok(University {
        name: row.get("name"),
        country: row.get("country"),
        state_province: row.get("state_province"),
        web_pages: serde_json::from_str(&web_pages_json)
            .map_err(|e| Error::backend("decode web_pages", e))?,
        domains: serde_json::from_str(&domains_json)
            .map_err(|e| Error::backend("decode domains", e))?,
        alpha_two_code: row.get("alpha_two_code"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_store(dir: &tempfile::TempDir) -> SqliteUniversityStore {
        SqliteUniversityStore::new(dir.path().join("universities.db"))
            .await
            .unwrap()
    }

    fn uni(name: &str, country: &str, state: Option<&str>) -> University {
        University::new(
            name,
            country,
            state.map(str::to_string),
            vec![format!("http://{}.example/", name.to_lowercase().replace(' ', "-"))],
            vec![],
            Some("IN".to_string()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn round_trips_records_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .insert_many(&[uni("Delhi U", "India", None), uni("Amity U", "India", Some("Uttar Pradesh"))])
            .await
            .unwrap();

        let got = store.find(&UniversityFilter::default()).await.unwrap();
        let names: Vec<&str> = got.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Amity U", "Delhi U"]);
        assert_eq!(got[0].state_province.as_deref(), Some("Uttar Pradesh"));
        assert_eq!(got[0].web_pages.len(), 1);
        store.close().await;
    }

    #[tokio::test]
    async fn replace_leaves_other_countries_alone() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .insert_many(&[
                uni("Old A", "India", None),
                uni("Old B", "India", None),
                uni("Old C", "India", None),
                uni("Old D", "India", None),
                uni("Old E", "India", None),
                uni("MIT", "United States", Some("Massachusetts")),
            ])
            .await
            .unwrap();

        // 5 existing + 3 fetched must end at exactly 3, not 8.
        let stored = store
            .replace_country(
                "India",
                &[
                    uni("New A", "India", None),
                    uni("New B", "India", None),
                    uni("New C", "India", None),
                ],
            )
            .await
            .unwrap();
        assert_eq!(stored, 3);

        let india = store
            .find(&UniversityFilter {
                country: Some("India".to_string()),
                state_province: None,
            })
            .await
            .unwrap();
        assert_eq!(india.len(), 3);

        let us = store
            .find(&UniversityFilter {
                country: Some("United States".to_string()),
                state_province: None,
            })
            .await
            .unwrap();
        assert_eq!(us.len(), 1);
        assert_eq!(us[0].name, "MIT");
        store.close().await;
    }

    #[tokio::test]
    async fn state_filter_uses_exact_match() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .insert_many(&[
                uni("Gujarat U", "India", Some("Gujarat")),
                uni("Kerala U", "India", Some("Kerala")),
                uni("Plain U", "India", None),
            ])
            .await
            .unwrap();

        let got = store
            .find(&UniversityFilter {
                country: Some("India".to_string()),
                state_province: Some("Gujarat".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "Gujarat U");
        store.close().await;
    }

    #[tokio::test]
    async fn replacing_twice_with_same_snapshot_does_not_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        let snapshot = vec![uni("Amity U", "India", None), uni("Delhi U", "India", None)];
        store.replace_country("India", &snapshot).await.unwrap();
        store.replace_country("India", &snapshot).await.unwrap();

        let got = store.find(&UniversityFilter::default()).await.unwrap();
        assert_eq!(got.len(), 2);
        store.close().await;
    }
}
