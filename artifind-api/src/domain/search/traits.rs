//! Trait definitions for search domain abstractions.
//!
//! The artifact index is a capability: any text-search backend that can
//! evaluate a [`StructuredQuery`] can stand behind it.

use async_trait::async_trait;

use super::query::StructuredQuery;
use super::types::{FlatHits, GroupedHits};

/// Error type for search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid query: {0}")]
    QueryParse(String),

    #[error("Artifact index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Invalid pagination: page size must be positive, got {0}")]
    InvalidPagination(i64),
}

impl From<sqlx::Error> for SearchError {
    fn from(e: sqlx::Error) -> Self {
        SearchError::IndexUnavailable(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for SearchError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        SearchError::IndexUnavailable(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Read-only access to a prebuilt artifact index.
///
/// Opened once at startup and shared by all requests; implementations must
/// be safe for concurrent reads.
#[async_trait]
pub trait ArtifactIndex: Send + Sync {
    /// Return up to `limit` individual matches plus the total hit count.
    async fn search_flat(&self, query: &StructuredQuery, limit: usize) -> Result<FlatHits>;

    /// Return all matches grouped by `groupId:artifactId`.
    async fn search_grouped(&self, query: &StructuredQuery) -> Result<GroupedHits>;

    /// Release the index. Called once on shutdown.
    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    // Verify the trait is object-safe (can be used as a trait object)
    fn _assert_index_object_safe(_: &dyn ArtifactIndex) {}

    #[test]
    fn sqlx_errors_mean_unavailable_index() {
        let err: SearchError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, SearchError::IndexUnavailable(_)));
    }
}
