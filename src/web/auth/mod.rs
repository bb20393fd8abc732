pub mod errors;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use errors::AuthenticationError;
use hyper::{header, HeaderMap};

use crate::utils::state::AppState;

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE: &str = "token";

/// Session token from the cookie, falling back to an `Authorization: Bearer` header.
fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    let from_cookie = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

/// Authentication middleware guarding the admin routes
pub async fn auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, AuthenticationError> {
    let token =
        extract_token(&jar, request.headers()).ok_or(AuthenticationError::MissingToken)?;

    let claims = state.token_keys.verify(&token).map_err(|e| {
        tracing::debug!("Rejected session token: {e}");
        AuthenticationError::InvalidToken
    })?;

    // Insert the admin identity into request extensions
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
