pub(super) mod error;
pub(crate) mod handler;

pub use error::StoererError;
pub use handler::{clear_stoerer, get_stoerer, update_stoerer};
