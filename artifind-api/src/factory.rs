//! Composition root: builds the concrete index and clients from settings.

use std::sync::Arc;
use std::time::Duration;

use maven_repo::{FetchError, RepositoryClient, RepositoryUrl};
use sqlx::postgres::PgPoolOptions;

use crate::{
    config::{IndexBackend, IndexSettings, RepositorySettings},
    domain::search::{
        index::{PgArtifactIndex, SnapshotIndex},
        ArtifactIndex, SearchError,
    },
};

/// Open the configured artifact index.
pub async fn open_index(settings: &IndexSettings) -> Result<Arc<dyn ArtifactIndex>, SearchError> {
    match settings.backend {
        IndexBackend::Snapshot => {
            let index = SnapshotIndex::load(&settings.snapshot_path).await?;
            if index.is_empty() {
                tracing::warn!(
                    path = %settings.snapshot_path.display(),
                    "Artifact snapshot is empty, every search will return no results"
                );
            } else {
                tracing::info!(records = index.len(), "Opened snapshot artifact index");
            }
            Ok(Arc::new(index))
        }
        IndexBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .acquire_timeout(Duration::from_secs(5))
                .connect_with(settings.database.with_db())
                .await?;
            let index = PgArtifactIndex::new(pool);
            index.migrate().await?;
            tracing::info!(
                host = %settings.database.host,
                database = %settings.database.database_name,
                "Connected to artifact index database"
            );
            Ok(Arc::new(index))
        }
    }
}

pub fn repository_client(settings: &RepositorySettings) -> Result<RepositoryClient, FetchError> {
    let client = RepositoryClient::new(RepositoryUrl::new(settings.url.as_str()), settings.timeout())?;
    tracing::info!(url = %client.base_url(), "Using remote repository");
    Ok(client)
}
