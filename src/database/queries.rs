use std::{marker::PhantomData, sync::Arc};

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{
    admins, news, stoerer, Admin, NewsItem, NewsPatch, NewsPayload, StoererPayload,
    StoererRecord,
};

use super::{connection::Gateway, error::RepositoryError};

/// Store for one entity type, backed by the shared [`Gateway`].
pub struct SeaOrmStore<T> {
    gateway: Arc<Gateway>,
    _entity: PhantomData<T>,
}

impl<T> SeaOrmStore<T> {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            gateway,
            _entity: PhantomData,
        }
    }
}

impl<T> Clone for SeaOrmStore<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.gateway))
    }
}

pub type NewsStore = SeaOrmStore<news::Entity>;
pub type AdminStore = SeaOrmStore<admins::Entity>;
pub type StoererStore = SeaOrmStore<stoerer::Entity>;

/// Resets the display flag on every news item that currently carries it.
async fn clear_display<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    let result = news::Entity::update_many()
        .col_expr(news::Column::Display, Expr::value(false))
        .filter(news::Column::Display.eq(true))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

impl SeaOrmStore<news::Entity> {
    pub async fn find_all(&self) -> Result<Vec<NewsItem>, RepositoryError> {
        let db = self.gateway.connect().await?;
        let models = news::Entity::find().all(db).await?;
        Ok(models.into_iter().map(NewsItem::from).collect())
    }

    /// Inserts a new item. When it is displayed, every other item is hidden
    /// in the same transaction.
    pub async fn create(&self, payload: NewsPayload) -> Result<NewsItem, RepositoryError> {
        let db = self.gateway.connect().await?;
        let txn = db.begin().await?;

        let display = payload.display;
        if display {
            let hidden = clear_display(&txn).await?;
            tracing::debug!("Hid {hidden} displayed news item(s)");
        }

        let model = news::ActiveModel {
            id: Set(Uuid::new_v4()),
            display: Set(display),
            document: Set(Value::Object(payload.into_document())),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(model.into())
    }

    /// Merges the given fields into the item with `id`.
    ///
    /// Returns the number of rows changed. An unknown id changes nothing,
    /// including the display flags of other items.
    pub async fn update(&self, id: Uuid, patch: NewsPatch) -> Result<u64, RepositoryError> {
        if patch.is_empty() {
            return Ok(0);
        }

        let db = self.gateway.connect().await?;
        let txn = db.begin().await?;

        let Some(existing) = news::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(0);
        };

        if patch.sets_display() {
            clear_display(&txn).await?;
        }

        let mut document = match &existing.document {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        };
        for (key, value) in patch.document_changes() {
            document.insert(key.clone(), value.clone());
        }

        let mut changes: news::ActiveModel = existing.into();
        changes.document = Set(Value::Object(document));
        if let Some(display) = patch.display {
            changes.display = Set(display);
        }
        changes.update(&txn).await?;

        txn.commit().await?;
        Ok(1)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        let db = self.gateway.connect().await?;
        let result = news::Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }
}

impl SeaOrmStore<admins::Entity> {
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, RepositoryError> {
        let db = self.gateway.connect().await?;
        Ok(admins::Entity::find()
            .filter(admins::Column::Username.eq(username))
            .one(db)
            .await?)
    }

    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let db = self.gateway.connect().await?;
        Ok(admins::Entity::find().count(db).await?)
    }

    /// Stores a new admin. `password_hash` must already be hashed.
    pub async fn insert(&self, username: &str, password_hash: String) -> Result<Admin, RepositoryError> {
        let db = self.gateway.connect().await?;
        let admin = admins::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;
        Ok(admin)
    }
}

impl SeaOrmStore<stoerer::Entity> {
    /// Returns the banner, creating an inactive one if none exists yet.
    pub async fn get_or_create(&self) -> Result<StoererRecord, RepositoryError> {
        let db = self.gateway.connect().await?;
        if let Some(record) = stoerer::Entity::find().one(db).await? {
            return Ok(record);
        }

        tracing::info!("No banner found, creating an inactive one");
        let record = stoerer::ActiveModel {
            id: Set(Uuid::new_v4()),
            line1: Set(String::new()),
            line2: Set(String::new()),
            is_active: Set(false),
            updated_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;
        Ok(record)
    }

    /// Replaces the banner content. Missing fields fall back to empty/inactive.
    pub async fn upsert(&self, payload: StoererPayload) -> Result<StoererRecord, RepositoryError> {
        let db = self.gateway.connect().await?;
        let line1 = payload.line1.unwrap_or_default();
        let line2 = payload.line2.unwrap_or_default();
        let is_active = payload.is_active.unwrap_or(false);

        let record = match stoerer::Entity::find().one(db).await? {
            Some(existing) => {
                let mut active: stoerer::ActiveModel = existing.into();
                active.line1 = Set(line1);
                active.line2 = Set(line2);
                active.is_active = Set(is_active);
                active.updated_at = Set(Utc::now());
                active.update(db).await?
            }
            None => {
                stoerer::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    line1: Set(line1),
                    line2: Set(line2),
                    is_active: Set(is_active),
                    updated_at: Set(Utc::now()),
                }
                .insert(db)
                .await?
            }
        };
        Ok(record)
    }

    /// Blanks every banner row. Rows are kept so the singleton survives.
    pub async fn clear(&self) -> Result<u64, RepositoryError> {
        let db = self.gateway.connect().await?;
        let result = stoerer::Entity::update_many()
            .col_expr(stoerer::Column::Line1, Expr::value(""))
            .col_expr(stoerer::Column::Line2, Expr::value(""))
            .col_expr(stoerer::Column::IsActive, Expr::value(false))
            .col_expr(stoerer::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
