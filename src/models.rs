use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// News entries. Apart from the display flag and the timestamps the item is an
// opaque document, stored as a JSON object in `document`.
pub mod news {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "news")]
    #[serde(rename_all = "camelCase")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub display: bool,
        pub document: Json,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Keys owned by the server. Clients cannot set them through the document.
const RESERVED_NEWS_KEYS: [&str; 3] = ["id", "display", "createdAt"];

fn strip_reserved(mut fields: Map<String, Value>) -> Map<String, Value> {
    for key in RESERVED_NEWS_KEYS {
        fields.remove(key);
    }
    fields
}

/// A news item as clients see it: the stored document with `id`, `display`
/// and `createdAt` alongside its own fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: Uuid,
    pub display: bool,
    pub created_at: DateTimeUtc,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<news::Model> for NewsItem {
    fn from(model: news::Model) -> Self {
        let fields = match model.document {
            Value::Object(fields) => strip_reserved(fields),
            _ => Map::new(),
        };
        Self {
            id: model.id,
            display: model.display,
            created_at: model.created_at,
            fields,
        }
    }
}

// Administrator accounts
pub mod admins {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "admins")]
    #[serde(rename_all = "camelCase")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub username: String,
        #[serde(skip_serializing)]
        pub password_hash: String,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub type Admin = admins::Model;

// The site-wide announcement banner
pub mod stoerer {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "stoerer")]
    #[serde(rename_all = "camelCase")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub line1: String,
        pub line2: String,
        pub is_active: bool,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub type StoererRecord = stoerer::Model;

/// Request payload for creating a news item. Any field besides `display` is
/// kept as part of the item.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewsPayload {
    #[serde(default)]
    pub display: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NewsPayload {
    /// The fields to store, without the ones the server assigns.
    pub fn into_document(self) -> Map<String, Value> {
        strip_reserved(self.fields)
    }
}

/// Partial update of a news item. Absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewsPatch {
    #[serde(default)]
    pub display: Option<bool>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl NewsPatch {
    pub fn is_empty(&self) -> bool {
        self.display.is_none() && self.document_changes().next().is_none()
    }

    pub fn sets_display(&self) -> bool {
        self.display == Some(true)
    }

    /// Field changes to merge into the stored document.
    pub fn document_changes(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields
            .iter()
            .filter(|(key, _)| !RESERVED_NEWS_KEYS.contains(&key.as_str()))
    }
}

/// Request payload for replacing the banner content
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoererPayload {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub is_active: Option<bool>,
}

/// Public view of the banner
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stoerer {
    pub line1: String,
    pub line2: String,
    pub is_active: bool,
}

impl Stoerer {
    pub fn inactive() -> Self {
        Self {
            line1: String::new(),
            line2: String::new(),
            is_active: false,
        }
    }
}

impl From<StoererRecord> for Stoerer {
    /// Inactive banners never expose their stored lines.
    fn from(record: StoererRecord) -> Self {
        if record.is_active {
            Self {
                line1: record.line1,
                line2: record.line2,
                is_active: true,
            }
        } else {
            Self::inactive()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
