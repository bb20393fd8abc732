use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("failed to connect to the database: {0}")]
    Connection(String),
    #[error("{0}")]
    Query(#[from] DbErr),
}
