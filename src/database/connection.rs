use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::OnceCell;

use super::{error::RepositoryError, Migrator};

/// Owns the process-wide database handle.
///
/// The connection is established lazily on the first call to [`Gateway::connect`]
/// and reused afterwards. A failed attempt is not cached, so the next caller
/// tries again.
pub struct Gateway {
    url: SecretString,
    conn: OnceCell<DatabaseConnection>,
}

impl Gateway {
    pub fn new(url: impl Into<SecretString>) -> Self {
        Self {
            url: url.into(),
            conn: OnceCell::new(),
        }
    }

    /// Wraps an already established (and migrated) connection.
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            url: SecretString::from(String::new()),
            conn: OnceCell::new_with(Some(conn)),
        }
    }

    pub async fn connect(&self) -> Result<&DatabaseConnection, RepositoryError> {
        self.conn
            .get_or_try_init(|| async {
                tracing::info!("Connecting to database...");
                let db = Database::connect(self.url.expose_secret())
                    .await
                    .map_err(|e| {
                        tracing::error!("Error connecting to database: {e}");
                        RepositoryError::Connection(e.to_string())
                    })?;

                Migrator::up(&db, None).await.map_err(|e| {
                    tracing::error!("Failed to apply migrations: {e}");
                    RepositoryError::Connection(e.to_string())
                })?;

                tracing::info!("Connected to database");
                Ok(db)
            })
            .await
    }

    pub fn is_connected(&self) -> bool {
        self.conn.initialized()
    }
}
