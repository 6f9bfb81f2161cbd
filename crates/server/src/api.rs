//! JSON API routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::debug;

use lumina_core::book::Book;
use lumina_core::error::FavoritesError;
use lumina_core::related::exclude_seed;
use lumina_core::topics::{topic_query, Topic, TOPICS};

use crate::AppState;

/// Query params for GET /api/search
#[derive(Debug, serde::Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/trending", get(trending))
        .route("/api/topics", get(topics))
        .route("/api/topics/:topic", get(browse_topic))
        .route("/api/related", post(related))
        .route("/api/favorites", get(list_favorites).put(put_favorite))
        .route("/api/favorites/:id", delete(delete_favorite))
        .with_state(state)
}

async fn search(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let query = q
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing search query".to_string()))?;
    Ok(Json(state.aggregator.search(&query).await))
}

async fn trending(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.aggregator.trending().await)
}

async fn topics() -> Json<&'static [Topic]> {
    Json(TOPICS)
}

async fn browse_topic(State(state): State<AppState>, Path(topic): Path<String>) -> Json<Vec<Book>> {
    debug!(%topic, "browse topic");
    Json(state.aggregator.by_topic(topic_query(&topic)).await)
}

async fn related(State(state): State<AppState>, Json(seed): Json<Book>) -> Json<Vec<Book>> {
    let books = state.aggregator.related(&seed).await;
    Json(exclude_seed(books, &seed.id))
}

async fn list_favorites(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let store = state.favorites.lock().map_err(|_| ApiError::poisoned())?;
    Ok(Json(store.list().to_vec()))
}

async fn put_favorite(
    State(state): State<AppState>,
    Json(book): Json<Book>,
) -> Result<Json<PutResponse>, ApiError> {
    if book.id.is_empty() {
        return Err(ApiError::BadRequest("book id is required".to_string()));
    }
    let id = book.id.clone();
    let mut store = state.favorites.lock().map_err(|_| ApiError::poisoned())?;
    let added = store.add(book)?;
    Ok(Json(PutResponse { id, added }))
}

async fn delete_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.favorites.lock().map_err(|_| ApiError::poisoned())?;
    store.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(serde::Serialize)]
struct PutResponse {
    id: String,
    added: bool,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    fn poisoned() -> Self {
        ApiError::Internal("favorites store is unavailable".to_string())
    }
}

impl From<FavoritesError> for ApiError {
    fn from(e: FavoritesError) -> Self {
        match e {
            FavoritesError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            ApiError::NotFound(s) => (StatusCode::NOT_FOUND, format!("not found: {}", s)),
            ApiError::BadRequest(s) => (StatusCode::BAD_REQUEST, s.clone()),
            ApiError::Internal(s) => (StatusCode::INTERNAL_SERVER_ERROR, s.clone()),
        };
        (status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(s) => write!(f, "not found: {}", s),
            ApiError::BadRequest(s) => write!(f, "bad request: {}", s),
            ApiError::Internal(s) => write!(f, "internal error: {}", s),
        }
    }
}
