use async_trait::async_trait;

use crate::models::{University, UniversityFilter};
use crate::normalize::RawUniversity;
use crate::Result;

/// Persistence boundary for university records.
///
/// Injected as `Arc<dyn UniversityStore>` into both the ingestion engine
/// and the query service; constructors open the backing handle and
/// [`UniversityStore::close`] releases it.
#[async_trait]
pub trait UniversityStore: Send + Sync {
    /// Insert a batch of records. All-or-nothing where the backend
    /// supports it.
    async fn insert_many(&self, records: &[University]) -> Result<u64>;

    /// Delete every record in one country partition. Returns rows removed.
    async fn delete_by_country(&self, country: &str) -> Result<u64>;

    /// Replace one country partition with a new snapshot.
    ///
    /// Implementations must apply the delete-then-insert pair as a single
    /// unit at the partition key: an overlapping reader observes the old
    /// snapshot or the new one, never a mix, and two replacements of the
    /// same country must not interleave.
    async fn replace_country(&self, country: &str, records: &[University]) -> Result<u64>;

    /// Records matching `filter`, sorted by name ascending; records with
    /// identical names retain insertion order.
    async fn find(&self, filter: &UniversityFilter) -> Result<Vec<University>>;

    /// Release the underlying connection handle.
    async fn close(&self);
}

/// The external directory this service synchronizes from.
///
/// Implementations live in `unisync_integrations` or test code.
#[async_trait]
pub trait UniversitySource: Send + Sync {
    /// Fetch the latest snapshot of one country's universities.
    ///
    /// Transport failures and timeouts surface as
    /// [`crate::Error::SourceUnavailable`].
    async fn fetch_country(&self, country: &str) -> Result<Vec<RawUniversity>>;
}
