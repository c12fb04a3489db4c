//! Artifact index implementations.

#[cfg(test)]
mod mock;
mod postgres;
mod snapshot;

#[cfg(test)]
pub use mock::UnavailableIndex;
pub use postgres::PgArtifactIndex;
pub use snapshot::SnapshotIndex;
