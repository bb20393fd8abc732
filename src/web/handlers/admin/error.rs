use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;

use crate::models::MessageResponse;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Malformed body: {0}")]
    MalformedBody(String),
    #[error("Login failed")]
    InternalServerError,
}

impl IntoResponse for AdminError {
    fn into_response(self) -> axum::response::Response {
        use AdminError::*;
        let status_code = match self {
            MissingCredentials => StatusCode::BAD_REQUEST,
            InvalidCredentials => StatusCode::UNAUTHORIZED,
            MalformedBody(_) => StatusCode::BAD_REQUEST,
            InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status_code, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
