use std::sync::Arc;

use config::ConfigError;

use crate::{
    auth::TokenKeys,
    config::Config,
    database::{AdminStore, Gateway, NewsStore, StoererStore},
};

#[derive(Clone)]
pub struct AppState {
    pub news_repo: NewsStore,
    pub admin_repo: AdminStore,
    pub stoerer_repo: StoererStore,
    pub token_keys: Arc<TokenKeys>,
    /// Whether session cookies carry the `Secure` attribute
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>, token_keys: TokenKeys, secure_cookies: bool) -> Self {
        Self {
            news_repo: NewsStore::new(Arc::clone(&gateway)),
            admin_repo: AdminStore::new(Arc::clone(&gateway)),
            stoerer_repo: StoererStore::new(gateway),
            token_keys: Arc::new(token_keys),
            secure_cookies,
        }
    }
}

/// Builds the application state from the configuration.
///
/// The database connection itself is opened lazily by the gateway.
pub fn setup(config: &Config) -> Result<AppState, ConfigError> {
    if config.server.is_production() && config.auth.uses_dev_secret() {
        tracing::warn!("Running in production with the development JWT secret; set APP_AUTH__JWT_SECRET");
    }

    let gateway = Arc::new(Gateway::new(config.database.connection_url()));
    let token_keys = TokenKeys::new(&config.auth.jwt_secret, config.auth.token_ttl()?);

    Ok(AppState::new(
        gateway,
        token_keys,
        config.server.is_production(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, DatabaseConfig, DeploymentEnv, ServerConfig};
    use chrono::Duration;
    use secrecy::SecretString;

    fn config(token_ttl_hours: i64) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5001,
                environment: DeploymentEnv::Development,
                client_url: "http://localhost:3000".to_string(),
            },
            database: DatabaseConfig {
                url: SecretString::from("postgres://localhost:5432"),
                name: "news".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: SecretString::from("secret"),
                token_ttl_hours,
                bootstrap_username: "admin".to_string(),
                bootstrap_password: SecretString::from("admin123"),
            },
        }
    }

    #[test]
    fn test_setup_uses_configured_token_ttl() {
        let state = setup(&config(2)).unwrap();

        assert_eq!(state.token_keys.ttl(), Duration::hours(2));
        assert!(!state.secure_cookies);
    }

    #[test]
    fn test_setup_rejects_out_of_range_token_ttl() {
        assert!(setup(&config(i64::MAX)).is_err());
    }
}
