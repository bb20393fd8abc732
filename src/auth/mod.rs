pub mod authentication;
pub mod crypto;
pub mod errors;

pub use authentication::{ensure_bootstrap_admin, login, Claims, TokenKeys};
pub use errors::AuthError;
