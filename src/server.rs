use axum::{extract::Request, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::api::MOVIES_PATH;
use crate::config::Config;
use crate::upstream::MovieSource;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn MovieSource>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn MovieSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(MOVIES_PATH, get(crate::api::get_movies))
        .route("/api/search", get(crate::api::search_movies))
        // Older frontends call the listing without the /api prefix.
        .route("/movies", get(crate::api::get_movies));

    let mut router = Router::new()
        .route("/", get(crate::api::root_handler))
        .route("/app", get(crate::api::app_page))
        .merge(api_routes)
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        router = router.fallback_service(ServeDir::new(appdir));
    }

    router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    // CORS preflight for unknown paths
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
