pub(crate) mod connection;
pub(crate) mod error;
pub(crate) mod queries;

pub use connection::Gateway;
pub use error::RepositoryError;
pub use migrations::Migrator;
pub use queries::{AdminStore, NewsStore, StoererStore};

/// Database migrations module
pub mod migrations {
    use sea_orm_migration::prelude::*;

    /// Main migrator struct for database migrations
    pub struct Migrator;

    #[async_trait::async_trait]
    impl MigratorTrait for Migrator {
        fn migrations() -> Vec<Box<dyn MigrationTrait>> {
            vec![Box::new(tables::Migration)]
        }
    }

    /// Database tables module containing table creation migrations
    pub mod tables {
        use super::*;

        /// Migration struct for creating database tables
        #[derive(DeriveMigrationName)]
        pub struct Migration;

        #[async_trait::async_trait]
        impl MigrationTrait for Migration {
            /// Creates the necessary database tables if they don't exist
            async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
                manager
                    .create_table(
                        Table::create()
                            .table(News::Table)
                            .if_not_exists()
                            .col(ColumnDef::new(News::Id).uuid().not_null().primary_key())
                            .col(
                                ColumnDef::new(News::Display)
                                    .boolean()
                                    .not_null()
                                    .default(false),
                            )
                            .col(ColumnDef::new(News::Document).json().not_null())
                            .col(
                                ColumnDef::new(News::CreatedAt)
                                    .timestamp_with_time_zone()
                                    .not_null(),
                            )
                            .to_owned(),
                    )
                    .await?;

                // Usernames are unique so the login lookup is unambiguous
                manager
                    .create_table(
                        Table::create()
                            .table(Admins::Table)
                            .if_not_exists()
                            .col(ColumnDef::new(Admins::Id).uuid().not_null().primary_key())
                            .col(
                                ColumnDef::new(Admins::Username)
                                    .string()
                                    .not_null()
                                    .unique_key(),
                            )
                            .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
                            .col(
                                ColumnDef::new(Admins::CreatedAt)
                                    .timestamp_with_time_zone()
                                    .not_null(),
                            )
                            .to_owned(),
                    )
                    .await?;

                manager
                    .create_table(
                        Table::create()
                            .table(Stoerer::Table)
                            .if_not_exists()
                            .col(ColumnDef::new(Stoerer::Id).uuid().not_null().primary_key())
                            .col(ColumnDef::new(Stoerer::Line1).string().not_null())
                            .col(ColumnDef::new(Stoerer::Line2).string().not_null())
                            .col(
                                ColumnDef::new(Stoerer::IsActive)
                                    .boolean()
                                    .not_null()
                                    .default(false),
                            )
                            .col(
                                ColumnDef::new(Stoerer::UpdatedAt)
                                    .timestamp_with_time_zone()
                                    .not_null(),
                            )
                            .to_owned(),
                    )
                    .await?;

                Ok(())
            }

            /// Drops the database tables
            async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
                manager
                    .drop_table(Table::drop().table(Stoerer::Table).to_owned())
                    .await?;
                manager
                    .drop_table(Table::drop().table(Admins::Table).to_owned())
                    .await?;
                manager
                    .drop_table(Table::drop().table(News::Table).to_owned())
                    .await?;
                Ok(())
            }
        }

        #[derive(Iden)]
        enum News {
            Table,
            Id,
            Display,
            Document,
            CreatedAt,
        }

        #[derive(Iden)]
        enum Admins {
            Table,
            Id,
            Username,
            PasswordHash,
            CreatedAt,
        }

        #[derive(Iden)]
        enum Stoerer {
            Table,
            Id,
            Line1,
            Line2,
            IsActive,
            UpdatedAt,
        }
    }
}
