use std::sync::Arc;

use chrono::Duration;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use secrecy::SecretString;

use crate::{
    auth::TokenKeys,
    database::{Gateway, Migrator},
    utils::state::AppState,
};

pub const TEST_SECRET: &str = "test-secret";

/// A fresh, migrated in-memory database.
pub async fn test_gateway() -> Arc<Gateway> {
    // a single connection, otherwise every pooled connection gets its own empty database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to apply migrations");

    Arc::new(Gateway::from_connection(db))
}

pub fn test_token_keys() -> TokenKeys {
    TokenKeys::new(&SecretString::from(TEST_SECRET), Duration::hours(24))
}

pub async fn test_app_state() -> AppState {
    AppState::new(test_gateway().await, test_token_keys(), false)
}
