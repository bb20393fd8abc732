pub(super) mod error;
pub(crate) mod handler;

pub use error::NewsError;
pub use handler::{create_news, delete_news, list_news, update_news};
