use async_trait::async_trait;
use std::sync::Arc;

use crate::api::{MovieList, MOVIES_PATH};
use crate::upstream::{MovieSource, UpstreamError};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to backend failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Backend returned status {0}")]
    Status(u16),
    #[error("Failed to decode movie list: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Upstream(#[from] UpstreamError),
}

/// Where the render client gets its movie list from.
#[async_trait]
pub trait MoviesFetcher: Send + Sync {
    async fn fetch_movies(&self) -> Result<MovieList, FetchError>;
}

/// Fetches the list from a running backend over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFetcher {
    /// `backend` is the origin the page was served from, e.g. `http://localhost:4000`.
    pub fn new(backend: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", backend.trim_end_matches('/'), MOVIES_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MoviesFetcher for HttpFetcher {
    async fn fetch_movies(&self) -> Result<MovieList, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Fetches the list in-process through the same source the proxy endpoint uses.
pub struct SourceFetcher {
    source: Arc<dyn MovieSource>,
}

impl SourceFetcher {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl MoviesFetcher for SourceFetcher {
    async fn fetch_movies(&self) -> Result<MovieList, FetchError> {
        let body = self.source.popular_movies().await?;
        Ok(serde_json::from_value(body)?)
    }
}
