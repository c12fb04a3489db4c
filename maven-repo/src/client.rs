use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;

use crate::{relative_path_to_coordinates, Coordinates, LayoutError, RepositoryUrl};

/// Fetches artifact files from a remote Maven repository by their
/// repository-relative path.
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    http_client: reqwest::Client,
    base_url: RepositoryUrl,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid artifact path: {0}")]
    InvalidPath(#[from] LayoutError),
    #[error("Artifact not found: {0}")]
    NotFound(String),
    #[error("ResponseError: {0}")]
    ResponseError(String),
}

/// A downloaded artifact file.
#[derive(Debug, Clone)]
pub struct ArtifactFile {
    pub coordinates: Coordinates,
    pub content: Bytes,
}

impl ArtifactFile {
    pub fn file_name(&self) -> String {
        self.coordinates.file_name()
    }
}

impl RepositoryClient {
    pub fn new(base_url: RepositoryUrl, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::ResponseError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &RepositoryUrl {
        &self.base_url
    }

    /// Resolve a user-supplied relative path to the canonical URL of the
    /// artifact. The path is parsed into coordinates and laid out again, so
    /// only well-formed Maven 2 paths ever reach the remote repository.
    pub fn resolve(&self, rel_filepath: &str) -> Result<(Coordinates, RepositoryUrl), FetchError> {
        let coordinates = relative_path_to_coordinates(rel_filepath)?;
        let url = self.base_url.append_path(&coordinates.to_relative_path());
        Ok((coordinates, url))
    }

    pub async fn fetch(&self, rel_filepath: &str) -> Result<ArtifactFile, FetchError> {
        let (coordinates, url) = self.resolve(rel_filepath)?;
        tracing::debug!(%coordinates, url = %url, "Fetching artifact");

        let resp = self
            .http_client
            .get(url.as_ref())
            .send()
            .await
            .map_err(|e| FetchError::ResponseError(e.to_string()))?;

        match resp.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound(url.to_string())),
            status if !status.is_success() => {
                return Err(FetchError::ResponseError(format!(
                    "{} returned {}",
                    url, status
                )))
            }
            _ => {}
        }

        let content = resp
            .bytes()
            .await
            .map_err(|e| FetchError::ResponseError(e.to_string()))?;

        Ok(ArtifactFile {
            coordinates,
            content,
        })
    }
}
