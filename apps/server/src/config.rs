//! Static service configuration
//!
//! Values are merged from, in increasing priority:
//! - built-in defaults
//! - an optional `config.{toml,yaml,json}` file in the working directory
//! - a `.env` file (loaded into the process environment)
//! - `MOVIES__*` environment variables, `__` separating sections
//!   (e.g. `MOVIES__ELASTIC__URL`, `MOVIES__CACHE__TTL_SECONDS`)

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

const ENV_PREFIX: &str = "MOVIES";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub elastic: ElasticConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty disables CORS headers.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElasticConfig {
    pub url: String,
    pub timeout_seconds: u64,
    pub movies_index: String,
    pub persons_index: String,
    pub genres_index: String,
}

impl ElasticConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:9200".to_string(),
            timeout_seconds: 10,
            movies_index: "movies".to_string(),
            persons_index: "persons".to_string(),
            genres_index: "genres".to_string(),
        }
    }
}

/// Response cache placed in front of the read routes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_seconds: u64,
    /// Maximum number of cached responses.
    pub capacity: usize,
    /// Larger response bodies are served uncached.
    pub max_body_bytes: usize,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 300,
            capacity: 1024,
            max_body_bytes: crate::cache::DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for the service crates when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// `daily`, `hourly`, `minutely` or `never`.
    pub file_rotation: String,
    pub opentelemetry_enabled: bool,
    pub otlp_endpoint: String,
    pub otlp_timeout_seconds: u64,
    pub trace_sample_ratio: f64,
    pub service_name: String,
    pub service_version: Option<String>,
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "movies-api".to_string(),
            file_rotation: "daily".to_string(),
            opentelemetry_enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            otlp_timeout_seconds: 10,
            trace_sample_ratio: 1.0,
            service_name: "movies-api".to_string(),
            service_version: None,
            deployment_environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env file is normal outside local development.
        let _ = dotenvy::dotenv();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        if self.elastic.url.trim().is_empty() {
            return Err("elastic.url must not be empty".to_string());
        }
        if self.elastic.timeout_seconds == 0 {
            return Err("elastic.timeout_seconds must be non-zero".to_string());
        }
        for (name, index) in [
            ("elastic.movies_index", &self.elastic.movies_index),
            ("elastic.persons_index", &self.elastic.persons_index),
            ("elastic.genres_index", &self.elastic.genres_index),
        ] {
            if index.trim().is_empty() {
                return Err(format!("{name} must not be empty"));
            }
        }
        if self.cache.enabled && (self.cache.ttl_seconds == 0 || self.cache.capacity == 0) {
            return Err("cache.ttl_seconds and cache.capacity must be non-zero when the cache is enabled".to_string());
        }
        if !(0.0..=1.0).contains(&self.logging.trace_sample_ratio) {
            return Err("logging.trace_sample_ratio must be within [0, 1]".to_string());
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address '{addr}': {e}"))
    }
}
