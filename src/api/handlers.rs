use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::types::*;
use crate::render::{App, SourceFetcher};
use crate::server::AppState;

/// Errors surfaced to API callers. Every upstream failure collapses into one
/// fixed body per endpoint; the cause only goes to the log.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to fetch movies")]
    FetchMovies,
    #[error("Failed to search movies")]
    SearchMovies,
    #[error("Missing query parameter")]
    MissingQuery,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::FetchMovies | ApiError::SearchMovies => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MissingQuery => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

pub async fn root_handler() -> &'static str {
    "Hello from Netflix Clone Backend!"
}

pub async fn get_movies(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.source.popular_movies().await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            error!(kind = e.kind(), "Failed to fetch movies: {}", e);
            Err(ApiError::FetchMovies)
        }
    }
}

pub async fn search_movies(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params.map_err(|e| {
        debug!("Rejected search query string: {}", e);
        ApiError::MissingQuery
    })?;
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::MissingQuery)?;

    match state.source.search_movies(query).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            warn!(kind = e.kind(), query, "Failed to search movies: {}", e);
            Err(ApiError::SearchMovies)
        }
    }
}

/// Server-side rendition of the frontend page.
pub async fn app_page(State(state): State<AppState>) -> Html<String> {
    let mut app = App::new(&state.config.tmdb.image_base_url);
    app.mount(&SourceFetcher::new(state.source.clone())).await;
    Html(app.render_document())
}
