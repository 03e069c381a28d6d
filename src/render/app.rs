use tracing::{debug, error};

use super::fetcher::MoviesFetcher;
use crate::api::MovieSummary;

pub const HEADER_TEXT: &str = "Netflix Clone";

/// The movie page. Holds the fetched list as view state and renders it.
pub struct App {
    image_base: String,
    movies: Vec<MovieSummary>,
    mounted: bool,
}

impl App {
    pub fn new(image_base: &str) -> Self {
        Self {
            image_base: image_base.to_string(),
            movies: Vec::new(),
            mounted: false,
        }
    }

    /// Fetch the list once. Later calls do nothing. A failed fetch is logged
    /// and leaves the list empty.
    pub async fn mount(&mut self, fetcher: &dyn MoviesFetcher) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        match fetcher.fetch_movies().await {
            Ok(list) => {
                debug!("Fetched {} movies", list.results.len());
                self.movies = list.results;
            }
            Err(e) => error!("Error fetching movies: {}", e),
        }
    }

    pub fn movies(&self) -> &[MovieSummary] {
        &self.movies
    }

    pub fn image_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base, poster_path)
    }

    /// The page body.
    pub fn render(&self) -> String {
        let mut html = String::new();
        html.push_str("<div class=\"App\">");
        html.push_str("<header class=\"App-header\">");
        html.push_str(&format!("<h1>{}</h1>", HEADER_TEXT));
        html.push_str("<div class=\"movie-list\">");
        for movie in &self.movies {
            html.push_str(&self.render_movie(movie));
        }
        html.push_str("</div>");
        html.push_str("</header>");
        html.push_str("</div>");
        html
    }

    fn render_movie(&self, movie: &MovieSummary) -> String {
        let title = escape_html(&movie.title);
        let mut html = format!("<div class=\"movie\" data-key=\"{}\">", movie.id);
        html.push_str(&format!("<h2>{}</h2>", title));
        if let Some(ref poster) = movie.poster_path {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(&self.image_url(poster)),
                title
            ));
        }
        html.push_str("</div>");
        html
    }

    /// Complete HTML document around `render()`.
    pub fn render_document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<div id=\"root\">{}</div>\n</body>\n</html>\n",
            HEADER_TEXT,
            self.render()
        )
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MovieList;
    use crate::render::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeFetcher {
        list: Option<Vec<MovieSummary>>,
        calls: AtomicUsize,
    }

    impl FakeFetcher {
        fn new(list: Option<Vec<MovieSummary>>) -> Self {
            Self {
                list,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MoviesFetcher for FakeFetcher {
        async fn fetch_movies(&self) -> Result<MovieList, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.list {
                Some(ref results) => Ok(MovieList {
                    results: results.clone(),
                }),
                None => Err(FetchError::Status(500)),
            }
        }
    }

    fn movie(id: i64, title: &str, poster: Option<&str>) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: poster.map(str::to_string),
        }
    }

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    #[test]
    fn test_header_before_mount() {
        let app = App::new(IMAGE_BASE);
        let html = app.render();
        assert!(html.contains("<h1>Netflix Clone</h1>"));
        assert!(!html.contains("class=\"movie\""));
    }

    #[tokio::test]
    async fn test_mount_success() {
        let fetcher = FakeFetcher::new(Some(vec![
            movie(1, "Movie 1", Some("/path1")),
            movie(2, "Movie 2", Some("/path2")),
        ]));
        let mut app = App::new(IMAGE_BASE);
        app.mount(&fetcher).await;

        assert_eq!(app.movies().len(), 2);
        let html = app.render();
        assert!(html.contains("<h1>Netflix Clone</h1>"));
        assert!(html.contains(
            "<div class=\"movie\" data-key=\"1\"><h2>Movie 1</h2><img src=\"https://image.tmdb.org/t/p/w500/path1\" alt=\"Movie 1\"></div>"
        ));
        let first = html.find("Movie 1").unwrap();
        let second = html.find("Movie 2").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_mount_failure_leaves_list_empty() {
        let fetcher = FakeFetcher::new(None);
        let mut app = App::new(IMAGE_BASE);
        app.mount(&fetcher).await;

        assert!(app.movies().is_empty());
        let html = app.render();
        assert!(html.contains("<h1>Netflix Clone</h1>"));
        assert!(!html.contains("class=\"movie\""));
    }

    #[tokio::test]
    async fn test_mount_fetches_once() {
        let fetcher = FakeFetcher::new(Some(vec![movie(1, "Movie 1", Some("/p"))]));
        let mut app = App::new(IMAGE_BASE);
        app.mount(&fetcher).await;
        app.mount(&fetcher).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_poster_and_escaping() {
        let fetcher = FakeFetcher::new(Some(vec![movie(3, "Tom & Jerry <3>", None)]));
        let mut app = App::new(IMAGE_BASE);
        app.mount(&fetcher).await;

        let html = app.render();
        assert!(html.contains("<h2>Tom &amp; Jerry &lt;3&gt;</h2>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_render_document() {
        let doc = App::new(IMAGE_BASE).render_document();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Netflix Clone</title>"));
    }
}
