pub mod client;

pub use client::*;

use async_trait::async_trait;
use serde_json::Value;

/// Source of movie listings. The HTTP handlers only talk to this trait, so the
/// TMDB client can be swapped for an in-memory source in tests.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// The popular-movies listing, as returned by the upstream API.
    async fn popular_movies(&self) -> Result<Value, UpstreamError>;
    /// Title search, as returned by the upstream API.
    async fn search_movies(&self, query: &str) -> Result<Value, UpstreamError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Upstream returned status {0}")]
    Status(u16),
    #[error("Upstream returned invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Short tag for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Request(e) if e.is_timeout() => "timeout",
            UpstreamError::Request(_) => "network",
            UpstreamError::Status(code) if *code < 500 => "upstream-4xx",
            UpstreamError::Status(_) => "upstream-5xx",
            UpstreamError::Parse(_) => "parse",
        }
    }
}
