use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    models::{NewsItem, NewsPatch, NewsPayload},
    utils::state::AppState,
};

use super::error::NewsError;

fn parse_id(id: &str) -> Result<Uuid, NewsError> {
    Uuid::try_parse(id).map_err(|e| NewsError::InvalidId(e.to_string()))
}

pub async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsItem>>, NewsError> {
    let items = state.news_repo.find_all().await.map_err(|e| {
        tracing::error!("Error fetching news: {e:?}");
        NewsError::FetchFailed(e.to_string())
    })?;
    Ok(Json(items))
}

pub async fn create_news(
    State(state): State<AppState>,
    payload: Result<Json<NewsPayload>, JsonRejection>,
) -> Result<impl IntoResponse, NewsError> {
    let Json(payload) = payload.map_err(|e| NewsError::MalformedBody(e.body_text()))?;

    let item = state.news_repo.create(payload).await.map_err(|e| {
        tracing::error!("Error adding news: {e:?}");
        NewsError::CreateFailed(e.to_string())
    })?;

    tracing::info!(id = %item.id, display = item.display, "News item created");
    Ok((StatusCode::OK, "News added successfully"))
}

pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewsPatch>, JsonRejection>,
) -> Result<impl IntoResponse, NewsError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload.map_err(|e| NewsError::MalformedBody(e.body_text()))?;

    let updated = state.news_repo.update(id, patch).await.map_err(|e| {
        tracing::error!("Error updating news: {e:?}");
        NewsError::UpdateFailed(e.to_string())
    })?;

    if updated == 0 {
        tracing::debug!(%id, "News update matched no item");
    }
    Ok((StatusCode::OK, "News updated successfully"))
}

pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, NewsError> {
    let id = parse_id(&id)?;

    let deleted = state.news_repo.delete(id).await.map_err(|e| {
        tracing::error!("Error deleting news: {e:?}");
        NewsError::DeleteFailed(e.to_string())
    })?;

    if deleted == 0 {
        tracing::debug!(%id, "News delete matched no item");
    }
    Ok((StatusCode::OK, "News deleted successfully"))
}
