//! Index doubles for testing failure paths.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::search::query::StructuredQuery;
use crate::domain::search::traits::{ArtifactIndex, Result, SearchError};
use crate::domain::search::types::{FlatHits, GroupedHits};

/// An index whose storage is corrupt: every query fails.
#[derive(Clone, Default)]
pub struct UnavailableIndex {
    calls: Arc<AtomicUsize>,
}

impl UnavailableIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queries that reached the index.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SearchError::IndexUnavailable(
            "index segment checksum mismatch".to_string(),
        ))
    }
}

#[async_trait]
impl ArtifactIndex for UnavailableIndex {
    async fn search_flat(&self, _query: &StructuredQuery, _limit: usize) -> Result<FlatHits> {
        self.fail()
    }

    async fn search_grouped(&self, _query: &StructuredQuery) -> Result<GroupedHits> {
        self.fail()
    }
}
