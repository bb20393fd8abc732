use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::models::MessageResponse;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoererError {
    #[error("Failed to load the banner")]
    FetchFailed,
    #[error("Failed to update the banner")]
    UpdateFailed,
    #[error("Failed to clear the banner")]
    ClearFailed,
    #[error("Malformed body: {0}")]
    MalformedBody(String),
}

impl IntoResponse for StoererError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self {
            StoererError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
