pub(super) mod error;
pub(crate) mod handler;

pub use error::AdminError;
pub use handler::{login, logout, verify};
