use thiserror::Error;

use crate::database::RepositoryError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("failed to sign token: {0}")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),
    #[error("token expiry is out of range")]
    TokenLifetime,
    #[error("password hashing failed: {0}")]
    PasswordHashing(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
