//! Search service tying normalization, query building, index execution and
//! pagination together.

use std::sync::Arc;

use tracing::{debug, info};

use super::builder::QueryBuilder;
use super::normalizer::normalize_query;
use super::paginator::paginate;
use super::query::StructuredQuery;
use super::traits::{ArtifactIndex, Result, SearchError};
use super::types::{ArtifactRecord, SearchResultPage};

/// Configuration for the search service.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Page size used when the caller does not pass one
    pub default_page_size: i64,
    /// Largest page size (and flat result limit) allowed
    pub max_page_size: i64,
    /// Only return artifacts with this classifier
    pub classifier: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            classifier: Some("sources".to_string()),
        }
    }
}

/// Search service over a shared artifact index.
///
/// # Examples
///
/// ```ignore
/// let service = SearchService::new(Arc::new(index), SearchConfig::default());
/// let page = service.search("com.acme.widget", Some(10), Some(1)).await?;
/// ```
pub struct SearchService<I: ?Sized> {
    index: Arc<I>,
    builder: QueryBuilder,
    config: SearchConfig,
}

impl<I> SearchService<I>
where
    I: ArtifactIndex + ?Sized,
{
    /// Create a new search service.
    pub fn new(index: Arc<I>, config: SearchConfig) -> Self {
        Self {
            index,
            builder: QueryBuilder,
            config,
        }
    }

    /// Create a search service with default configuration.
    #[allow(dead_code)]
    pub fn with_defaults(index: Arc<I>) -> Self {
        Self::new(index, SearchConfig::default())
    }

    /// Normalize and build the user query, restricted to the configured
    /// classifier.
    fn build_query(&self, user_query: &str) -> Result<StructuredQuery> {
        let normalized = normalize_query(user_query);
        let query = self.builder.build(&normalized)?;

        let query = match self.config.classifier.as_deref() {
            Some(classifier) => self.builder.with_classifier(query, classifier),
            None => query,
        };

        debug!(user_query, %normalized, %query, "Built search query");
        Ok(query)
    }

    /// Execute a grouped search and return one page of artifact summaries.
    ///
    /// # Arguments
    ///
    /// * `user_query` - Free-text query, e.g. `com.acme.widget` or `log4j`
    /// * `page_size` - Groups per page (None uses default, capped at max_page_size)
    /// * `page_number` - 1-based page number (None, 0 and 1 are the first page)
    pub async fn search(
        &self,
        user_query: &str,
        page_size: Option<i64>,
        page_number: Option<i64>,
    ) -> Result<SearchResultPage> {
        let page_size = page_size.unwrap_or(self.config.default_page_size);
        if page_size <= 0 {
            return Err(SearchError::InvalidPagination(page_size));
        }
        let page_size = page_size.min(self.config.max_page_size);
        let page_number = page_number.unwrap_or(1);

        let query = self.build_query(user_query)?;
        let hits = self.index.search_grouped(&query).await?;

        info!(
            user_query,
            total_groups = hits.total_groups,
            total_individual = hits.total_individual,
            page_size,
            page_number,
            "Grouped search completed"
        );

        paginate(hits, page_size, page_number)
    }

    /// Execute a flat search, one result per matching artifact file.
    pub async fn search_flat(
        &self,
        user_query: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ArtifactRecord>> {
        let limit = limit.unwrap_or(self.config.default_page_size);
        if limit <= 0 {
            return Err(SearchError::InvalidPagination(limit));
        }
        let limit = limit.min(self.config.max_page_size) as usize;

        let query = self.build_query(user_query)?;
        let hits = self.index.search_flat(&query, limit).await?;

        info!(user_query, total = hits.total_hits, "Flat search completed");

        Ok(hits.records)
    }
}
