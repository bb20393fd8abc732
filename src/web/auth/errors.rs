use axum::{response::IntoResponse, Json};
use hyper::StatusCode;
use thiserror::Error;

use crate::models::MessageResponse;

#[derive(Error, Debug)]
pub enum AuthenticationError {
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
}

impl IntoResponse for AuthenticationError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AuthenticationError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthenticationError::InvalidToken => StatusCode::FORBIDDEN,
        };

        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
