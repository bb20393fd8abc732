use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NewsError {
    #[error("Invalid news id: {0}")]
    InvalidId(String),
    #[error("Malformed body: {0}")]
    MalformedBody(String),
    #[error("Error fetching news: {0}")]
    FetchFailed(String),
    #[error("Error adding news: {0}")]
    CreateFailed(String),
    #[error("Error updating news: {0}")]
    UpdateFailed(String),
    #[error("Error deleting news: {0}")]
    DeleteFailed(String),
}

impl IntoResponse for NewsError {
    fn into_response(self) -> axum::response::Response {
        use NewsError::*;
        let status_code = match self {
            InvalidId(_) | MalformedBody(_) => StatusCode::BAD_REQUEST,
            FetchFailed(_) | CreateFailed(_) | UpdateFailed(_) | DeleteFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status_code, self.to_string()).into_response()
    }
}
