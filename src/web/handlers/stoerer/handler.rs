use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    models::{MessageResponse, Stoerer, StoererPayload},
    utils::state::AppState,
};

use super::error::StoererError;

// Public banner. Content stays hidden while the banner is inactive.
pub async fn get_stoerer(State(state): State<AppState>) -> Result<Json<Stoerer>, StoererError> {
    let record = state.stoerer_repo.get_or_create().await.map_err(|e| {
        tracing::error!("Failed to load banner: {e:?}");
        StoererError::FetchFailed
    })?;

    Ok(Json(record.into()))
}

pub async fn update_stoerer(
    State(state): State<AppState>,
    payload: Result<Json<StoererPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, StoererError> {
    let Json(payload) = payload.map_err(|e| StoererError::MalformedBody(e.body_text()))?;

    let record = state.stoerer_repo.upsert(payload).await.map_err(|e| {
        tracing::error!("Failed to update banner: {e:?}");
        StoererError::UpdateFailed
    })?;

    tracing::info!(active = record.is_active, "Banner updated");
    Ok(Json(MessageResponse::new("Banner updated successfully")))
}

pub async fn clear_stoerer(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, StoererError> {
    let cleared = state.stoerer_repo.clear().await.map_err(|e| {
        tracing::error!("Failed to clear banner: {e:?}");
        StoererError::ClearFailed
    })?;

    tracing::info!("Cleared {cleared} banner record(s)");
    Ok(Json(MessageResponse::new("Banner cleared successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Admin, startup::build_router, test_utils::test_app_state};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use chrono::Utc;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn app_and_token() -> (Router, String) {
        let state = test_app_state().await;
        let admin = Admin {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let token = state.token_keys.issue(&admin).unwrap();
        (build_router(state, "http://localhost:3000").unwrap(), token)
    }

    async fn get_banner(app: &Router) -> Stoerer {
        let request = Request::builder()
            .uri("/api/stoerer")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn put_banner(token: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("PUT")
            .uri("/api/admin/stoerer")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_banner_defaults_to_inactive() {
        let (app, _) = app_and_token().await;

        assert_eq!(get_banner(&app).await, Stoerer::inactive());
    }

    #[tokio::test]
    async fn test_active_banner_is_exposed() {
        let (app, token) = app_and_token().await;

        let response = app
            .clone()
            .oneshot(put_banner(
                Some(&token),
                json!({"line1": "A", "line2": "B", "isActive": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(
            get_banner(&app).await,
            Stoerer {
                line1: "A".to_string(),
                line2: "B".to_string(),
                is_active: true,
            }
        );
    }

    #[tokio::test]
    async fn test_inactive_banner_hides_content() {
        let (app, token) = app_and_token().await;

        app.clone()
            .oneshot(put_banner(
                Some(&token),
                json!({"line1": "A", "line2": "B", "isActive": false}),
            ))
            .await
            .unwrap();

        assert_eq!(get_banner(&app).await, Stoerer::inactive());
    }

    #[tokio::test]
    async fn test_update_requires_token() {
        let (app, _) = app_and_token().await;

        let response = app
            .oneshot(put_banner(None, json!({"line1": "A"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_clear_resets_the_banner() {
        let (app, token) = app_and_token().await;
        app.clone()
            .oneshot(put_banner(
                Some(&token),
                json!({"line1": "A", "line2": "B", "isActive": true}),
            ))
            .await
            .unwrap();

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/admin/stoerer")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(get_banner(&app).await, Stoerer::inactive());
    }

    #[tokio::test]
    async fn test_handlers_can_be_called_directly() {
        let state = test_app_state().await;

        let Json(banner) = get_stoerer(State(state.clone())).await.unwrap();
        assert_eq!(banner, Stoerer::inactive());

        let Json(message) = clear_stoerer(State(state)).await.unwrap();
        assert_eq!(message.message, "Banner cleared successfully");
    }
}
