//! Ranker error types.

use thiserror::Error;
use votematch_db::DbError;

pub type Result<T> = std::result::Result<T, RankerError>;

#[derive(Debug, Error)]
pub enum RankerError {
    /// A catalog or answer fetch failed. Not recoverable inside the core.
    #[error("Failed to fetch {table}: {source}")]
    Upstream {
        table: &'static str,
        #[source]
        source: DbError,
    },

    /// Persisting the result snapshot failed.
    #[error("Failed to store result snapshot: {0}")]
    Snapshot(#[source] DbError),
}

impl RankerError {
    pub(crate) fn upstream(table: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| RankerError::Upstream { table, source }
    }
}
