use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use netflix_clone_rs::config::Config;
use netflix_clone_rs::render::{App, HttpFetcher};
use netflix_clone_rs::server::{build_router, AppState};
use netflix_clone_rs::upstream::TmdbClient;

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Start a fake upstream and a backend pointing at it; returns the backend origin.
async fn start_backend(upstream: Router) -> String {
    start_backend_with_timeout(upstream, Duration::from_secs(5)).await
}

async fn start_backend_with_timeout(upstream: Router, timeout: Duration) -> String {
    let upstream = serve(upstream).await;
    let client = TmdbClient::new(&format!("{}/3", upstream), "test-key", timeout).unwrap();
    serve(build_router(AppState::new(Config::default(), Arc::new(client)))).await
}

fn two_movies() -> Value {
    json!({
        "results": [
            { "id": 1, "title": "Movie 1", "poster_path": "/path1" },
            { "id": 2, "title": "Movie 2", "poster_path": "/path2" }
        ]
    })
}

#[tokio::test]
async fn upstream_success_flows_through_to_render() {
    let backend = start_backend(Router::new().route(
        "/3/movie/popular",
        get(|| async { Json(two_movies()) }),
    ))
    .await;

    let response = reqwest::get(format!("{}/api/movies", backend)).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, two_movies());

    let mut app = App::new(IMAGE_BASE);
    app.mount(&HttpFetcher::new(&backend)).await;
    assert_eq!(app.movies().len(), 2);

    let html = app.render();
    assert!(html.contains("<h1>Netflix Clone</h1>"));
    assert!(html.contains("<h2>Movie 1</h2>"));
    assert!(html.contains("<h2>Movie 2</h2>"));
    assert!(html.contains("src=\"https://image.tmdb.org/t/p/w500/path1\""));
}

#[tokio::test]
async fn upstream_failure_collapses_and_renders_header_only() {
    let backend = start_backend(Router::new().route(
        "/3/movie/popular",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    ))
    .await;

    for _ in 0..2 {
        let response = reqwest::get(format!("{}/api/movies", backend)).await.unwrap();
        assert_eq!(response.status().as_u16(), 500);
        assert_eq!(
            response.text().await.unwrap(),
            r#"{"error":"Failed to fetch movies"}"#
        );
    }

    let mut app = App::new(IMAGE_BASE);
    app.mount(&HttpFetcher::new(&backend)).await;
    assert!(app.movies().is_empty());

    let html = app.render();
    assert!(html.contains("<h1>Netflix Clone</h1>"));
    assert!(!html.contains("class=\"movie\""));
}

#[tokio::test]
async fn hung_upstream_times_out_into_generic_error() {
    let backend = start_backend_with_timeout(
        Router::new().route(
            "/3/movie/popular",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(two_movies())
            }),
        ),
        Duration::from_secs(1),
    )
    .await;

    let response = reqwest::get(format!("{}/api/movies", backend)).await.unwrap();
    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"error":"Failed to fetch movies"}"#
    );
}
