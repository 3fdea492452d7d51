use std::error::Error as StdError;

/// Common error type for `unisync_core`.
///
/// Store backends should preserve the underlying error chain where
/// possible via `Error::backend`; source implementations wrap transport
/// failures via `Error::source_unavailable`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Bad caller input. Rejected before any I/O and never retried.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The external directory could not be reached or answered garbage.
    ///
    /// Safe to retry the whole operation: ingestion replaces rather than
    /// merges, so a re-run after a failed fetch is idempotent.
    #[error("source unavailable: {context}")]
    SourceUnavailable {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    /// One external record could not be normalized. Recovered locally by
    /// dropping the record; never aborts a batch.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error(transparent)]
    Storage(#[from] sqlx::Error),

    #[error("backend error: {context}")]
    Backend {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },
}

impl Error {
    pub fn source_unavailable(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::SourceUnavailable {
            context: context.into(),
            source: Box::new(source),
        }
    }

    pub fn backend(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Backend {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
