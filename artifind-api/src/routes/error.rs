use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use maven_repo::FetchError;
use serde::Serialize;
use std::fmt;

use crate::domain::search::SearchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidQuery,
    InvalidPagination,
    IndexUnavailable,
    InvalidPath,
    ArtifactNotFound,
    RepositoryError,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::QueryParse(_) => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::InvalidQuery)
            }
            SearchError::InvalidPagination(_) => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::InvalidPagination)
            }
            SearchError::IndexUnavailable(ref reason) => {
                tracing::error!("Artifact index unavailable: {}", reason);
                Self::service_unavailable("artifact index unavailable")
                    .with_code(ErrorCode::IndexUnavailable)
            }
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidPath(_) => {
                Self::bad_request(err.to_string()).with_code(ErrorCode::InvalidPath)
            }
            FetchError::NotFound(_) => {
                Self::not_found(err.to_string()).with_code(ErrorCode::ArtifactNotFound)
            }
            FetchError::ResponseError(ref e) => {
                tracing::error!("Remote repository error: {}", e);
                Self::bad_gateway("remote repository request failed")
                    .with_code(ErrorCode::RepositoryError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use maven_repo::LayoutError;

    use super::*;

    #[test]
    fn search_errors_map_to_statuses() {
        let err = ApiError::from(SearchError::QueryParse("unbalanced quote".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, Some(ErrorCode::InvalidQuery));

        let err = ApiError::from(SearchError::InvalidPagination(-1));
        assert_eq!(err.code, Some(ErrorCode::InvalidPagination));

        let err = ApiError::from(SearchError::IndexUnavailable("checksum".into()));
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.message, "artifact index unavailable");
    }

    #[test]
    fn fetch_errors_map_to_statuses() {
        let err = ApiError::from(FetchError::InvalidPath(LayoutError::Empty));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = ApiError::from(FetchError::NotFound("x".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = ApiError::from(FetchError::ResponseError("timeout".into()));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }
}
