use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{database::AdminStore, models::Admin};

use super::{
    crypto::{hash_password_blocking, verify_password_blocking},
    errors::AuthError,
};

/// Identity carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// HMAC keys used to sign and check session tokens
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, admin: &Admin) -> Result<String, AuthError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::TokenLifetime)?;
        let claims = Claims {
            id: admin.id.to_string(),
            username: admin.username.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthError::TokenSigning)
    }

    /// Checks signature and expiry and returns the embedded identity.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}

/// Checks the credentials and issues a session token for the admin.
pub async fn login(
    admins: &AdminStore,
    keys: &TokenKeys,
    username: &str,
    password: &str,
) -> Result<(Admin, String), AuthError> {
    let admin = admins
        .find_by_username(username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid =
        verify_password_blocking(password.to_string(), admin.password_hash.clone()).await?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    let token = keys.issue(&admin)?;
    Ok((admin, token))
}

/// Creates the default admin account when no admin exists yet.
///
/// Returns `true` when an account was created.
pub async fn ensure_bootstrap_admin(
    admins: &AdminStore,
    username: &str,
    password: &SecretString,
) -> Result<bool, AuthError> {
    if admins.count().await? > 0 {
        return Ok(false);
    }

    let hash = hash_password_blocking(password.expose_secret().to_string()).await?;
    admins.insert(username, hash).await?;

    tracing::info!("Created bootstrap admin account '{username}'");
    tracing::warn!("IMPORTANT: change the bootstrap admin password after the first login!");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_gateway, test_token_keys};
    use jsonwebtoken::errors::ErrorKind;
    use std::sync::Arc;
    use uuid::Uuid;

    fn admin(username: &str) -> Admin {
        Admin {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issued_token_verifies() {
        let keys = test_token_keys();
        let admin = admin("admin");

        let token = keys.issue(&admin).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.username, "admin");
        assert_eq!(claims.id, admin.id.to_string());
        assert_eq!(claims.exp - claims.iat, Duration::hours(24).num_seconds());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other = TokenKeys::new(&SecretString::from("other-secret"), Duration::hours(24));
        let token = other.issue(&admin("admin")).unwrap();

        let err = test_token_keys().verify(&token).unwrap_err();
        assert!(matches!(
            err,
            AuthError::InvalidToken(ref e) if matches!(e.kind(), ErrorKind::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = TokenKeys::new(&SecretString::from("test-secret"), Duration::hours(-2));
        let token = keys.issue(&admin("admin")).unwrap();

        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(
            err,
            AuthError::InvalidToken(ref e) if matches!(e.kind(), ErrorKind::ExpiredSignature)
        ));
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let keys = TokenKeys::new(&SecretString::from("test-secret"), Duration::MAX);

        assert!(matches!(
            keys.issue(&admin("admin")),
            Err(AuthError::TokenLifetime)
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(matches!(
            test_token_keys().verify("not.a.token"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let admins = AdminStore::new(test_gateway().await);
        let keys = test_token_keys();
        ensure_bootstrap_admin(&admins, "admin", &SecretString::from("admin123"))
            .await
            .unwrap();

        let (admin, token) = login(&admins, &keys, "admin", "admin123").await.unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.username, admin.username);
        assert_eq!(claims.id, admin.id.to_string());
    }

    #[tokio::test]
    async fn test_login_with_invalid_credentials() {
        let admins = AdminStore::new(test_gateway().await);
        let keys = test_token_keys();
        ensure_bootstrap_admin(&admins, "admin", &SecretString::from("admin123"))
            .await
            .unwrap();

        let wrong_password = login(&admins, &keys, "admin", "nope").await;
        assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));

        let wrong_username = login(&admins, &keys, "root", "admin123").await;
        assert!(matches!(wrong_username, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let gateway = test_gateway().await;
        let admins = AdminStore::new(Arc::clone(&gateway));
        let password = SecretString::from("admin123");

        assert!(ensure_bootstrap_admin(&admins, "admin", &password).await.unwrap());
        // simulated restart against the same database
        let restarted = AdminStore::new(gateway);
        assert!(!ensure_bootstrap_admin(&restarted, "admin", &password).await.unwrap());

        assert_eq!(restarted.count().await.unwrap(), 1);
        let stored = restarted.find_by_username("admin").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "admin123");
    }
}
