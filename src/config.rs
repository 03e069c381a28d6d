use serde::{Deserialize, Serialize};

/// Environment variable consulted when the config file has no `tmdb.api_key`.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(alias = "apikey", rename = "api_key")]
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(alias = "baseurl", rename = "base_url")]
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(alias = "imagebaseurl", rename = "image_base_url")]
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Outbound request timeout; 0 disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_port() -> String {
    "4000".to_string()
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

pub fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(path, &content)
    }

    fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }

    /// Load the config file if one was given, otherwise run on defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Fill in the API key from the environment when the file did not set one,
    /// and refuse to continue without a key.
    pub fn resolve_api_key(&mut self) -> Result<&str, ConfigError> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        self.resolve_api_key_with(env_key)
    }

    fn resolve_api_key_with(&mut self, env_key: Option<String>) -> Result<&str, ConfigError> {
        let configured = self
            .tmdb
            .api_key
            .take()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| env_key.filter(|k| !k.trim().is_empty()));

        match configured {
            Some(key) => Ok(self.tmdb.api_key.insert(key).as_str()),
            None => Err(ConfigError::MissingApiKey),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("No TMDB API key configured (set tmdb.api_key or ${var})", var = API_KEY_ENV)]
    MissingApiKey,
}
