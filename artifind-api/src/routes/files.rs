use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use maven_repo::ArtifactFile;
use serde::Deserialize;
use tracing::instrument;

use crate::app_state::AppState;

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(download_file))
}

#[derive(Debug, Clone, Deserialize)]
struct FileQuery {
    /// Repository-relative path, as returned in `versions[].relFilepath`
    fp: String,
}

#[instrument(name = "GET /files", skip(app_state))]
async fn download_file(
    State(app_state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Response, ApiError> {
    let file = app_state.repository_client().fetch(&query.fp).await?;
    tracing::debug!(file = %file.file_name(), bytes = file.content.len(), "Serving artifact");

    create_file_response(file)
}

fn create_file_response(file: ArtifactFile) -> Result<Response, ApiError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, file.content.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name()),
        )
        .header(header::CACHE_CONTROL, "must-revalidate")
        .body(Body::from(file.content))
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
