use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{MovieSource, UpstreamError};

/// Client for the TMDB v3 API. The API key travels as a query parameter.
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// A zero `timeout` leaves outbound requests without a deadline.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{}{}?api_key={}",
            self.base_url,
            endpoint,
            urlencoding::encode(&self.api_key)
        );
        for (name, value) in extra {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get_json(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        let url = self.build_url(endpoint, extra);
        debug!("GET {}{}", self.base_url, endpoint);

        // Errors carry the request url, which holds the key, so strip it.
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Request(e.without_url()))?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn popular_movies(&self) -> Result<Value, UpstreamError> {
        self.get_json("/movie/popular", &[]).await
    }

    async fn search_movies(&self, query: &str) -> Result<Value, UpstreamError> {
        self.get_json("/search/movie", &[("query", query)]).await
    }
}
