use std::sync::Arc;

use maven_repo::RepositoryClient;

use crate::domain::search::{ArtifactIndex, SearchConfig, SearchService};

pub type ArtifactSearchService = SearchService<dyn ArtifactIndex>;

#[derive(Clone)]
pub struct AppState {
    search_service: Arc<ArtifactSearchService>,
    repository_client: Arc<RepositoryClient>,
}

impl AppState {
    pub fn new(
        index: Arc<dyn ArtifactIndex>,
        search_config: SearchConfig,
        repository_client: RepositoryClient,
    ) -> Self {
        Self {
            search_service: Arc::new(SearchService::new(index, search_config)),
            repository_client: Arc::new(repository_client),
        }
    }

    pub fn search_service(&self) -> &ArtifactSearchService {
        &self.search_service
    }

    pub fn repository_client(&self) -> &RepositoryClient {
        &self.repository_client
    }
}
