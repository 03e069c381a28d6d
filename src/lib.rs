pub mod api;
pub mod config;
pub mod middleware;
pub mod render;
pub mod server;
pub mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Upstream client error: {0}")]
    Upstream(#[from] upstream::UpstreamError),
    #[error("Server error: {0}")]
    Server(String),
}

/// Load the configuration, check the API key, and serve until the listener fails.
pub async fn run(config_path: Option<&str>, debug_logs: bool) -> Result<(), ServerError> {
    let mut config = config::Config::load(config_path)?;

    match config_path {
        Some(path) => info!("Using config file: {}", path),
        None => info!("No config file given, using defaults"),
    }
    if debug_logs {
        info!("Debug logging enabled");
    }

    let api_key = config.resolve_api_key()?.to_string();

    info!("Upstream API at {}", config.tmdb.base_url);
    if config.tmdb.timeout_secs == 0 {
        info!("Upstream timeout disabled");
    }
    let client = upstream::TmdbClient::new(
        &config.tmdb.base_url,
        &api_key,
        Duration::from_secs(config.tmdb.timeout_secs),
    )?;

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls = match (&config.listen.tlscert, &config.listen.tlskey) {
        (Some(cert), Some(key)) => Some((cert.clone(), key.clone())),
        _ => None,
    };

    if let Some(ref appdir) = config.appdir {
        info!("Serving static files from {}", appdir);
    }

    let state = server::AppState::new(config, Arc::new(client));
    let app = server::build_router(state);

    if let Some((cert_path, key_path)) = tls {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}
