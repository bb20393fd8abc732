use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    auth::{login as check_login, AuthError, Claims},
    models::{LoginRequest, LoginResponse, MessageResponse, VerifyResponse},
    utils::state::AppState,
    web::auth::TOKEN_COOKIE,
};

use super::error::AdminError;

fn session_cookie(token: String, secure: bool, max_age: chrono::Duration) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(time::Duration::seconds(max_age.num_seconds()))
        .build()
}

fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

// Checks the admin credentials and sets the session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), AdminError> {
    let Json(payload) = payload.map_err(|e| AdminError::MalformedBody(e.body_text()))?;

    let (Some(username), Some(password)) = (required(payload.username), required(payload.password))
    else {
        return Err(AdminError::MissingCredentials);
    };

    let (admin, token) = check_login(&state.admin_repo, &state.token_keys, &username, &password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => {
                tracing::info!("Failed login attempt for '{username}'");
                AdminError::InvalidCredentials
            }
            e => {
                tracing::error!("Login error: {e:?}");
                AdminError::InternalServerError
            }
        })?;

    tracing::info!("Admin '{}' logged in", admin.username);
    let cookie = session_cookie(token, state.secure_cookies, state.token_keys.ttl());

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Logged in successfully".to_string(),
            username: admin.username,
        }),
    ))
}

// Always answers with an expired cookie, whether or not the client sent one
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let mut removal = Cookie::build((TOKEN_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .path("/")
        .build();
    removal.make_removal();

    (
        jar.add(removal),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

pub async fn verify(Extension(claims): Extension<Claims>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        username: claims.username,
    })
}
