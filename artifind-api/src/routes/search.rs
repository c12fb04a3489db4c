use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::search::{ArtifactRecord, SearchResultPage},
    AppState,
};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search))
        .route("/flat", get(search_flat))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery {
    #[serde(default)]
    q: String,
    page_size: Option<i64>,
    page: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct FlatSearchQuery {
    #[serde(default)]
    q: String,
    limit: Option<i64>,
}

#[instrument(name = "GET /search", skip(app_state))]
async fn search(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResultPage>, ApiError> {
    let page = app_state
        .search_service()
        .search(&query.q, query.page_size, query.page)
        .await?;

    Ok(Json(page))
}

#[instrument(name = "GET /search/flat", skip(app_state))]
async fn search_flat(
    State(app_state): State<AppState>,
    Query(query): Query<FlatSearchQuery>,
) -> Result<Json<Vec<ArtifactRecord>>, ApiError> {
    let records = app_state
        .search_service()
        .search_flat(&query.q, query.limit)
        .await?;

    Ok(Json(records))
}
