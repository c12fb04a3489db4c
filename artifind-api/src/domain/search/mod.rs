//! Artifact search over an index of repository files.
//!
//! A raw user query flows through:
//!
//! - `normalize_query` - coordinate-like input (`com.acme.widget`) is split
//!   into tokens and made a prefix search (`com acme widget*`)
//! - `QueryBuilder` - the normalized string is parsed into a
//!   `StructuredQuery` over the `groupId` and `artifactId` fields, with an
//!   extra phrase clause for multi-token input
//! - [`ArtifactIndex`] - the query runs against a backend (in-memory snapshot
//!   or PostgreSQL) returning flat or grouped hits
//! - `paginate` - groups are sliced into a [`SearchResultPage`]
//!
//! # Example
//!
//! ```ignore
//! use artifind_api::domain::search::{SearchService, SearchConfig};
//! use artifind_api::domain::search::index::SnapshotIndex;
//!
//! let index = SnapshotIndex::load("data/sample-index.jsonl").await?;
//! let service = SearchService::new(Arc::new(index), SearchConfig::default());
//!
//! let page = service.search("com.acme.widget", Some(10), Some(1)).await?;
//! ```

mod analyzer;
mod builder;
mod normalizer;
mod paginator;
mod query;
mod service;
mod traits;
mod types;

pub mod index;

pub use service::{SearchConfig, SearchService};
pub use traits::{ArtifactIndex, SearchError};
pub use types::{ArtifactRecord, SearchResultPage};
