//! Application configuration module
//!
//! Configuration is layered: built-in defaults, then an optional TOML file
//! (path in `BLOCKDOC_CONFIG`), then environment variables. The server
//! binary loads `.env` first so local development can keep secrets there.
//!
//! | Variable           | File key           | Default          |
//! |--------------------|--------------------|------------------|
//! | `BIND_ADDR`        | `bind_addr`        | `0.0.0.0`        |
//! | `SERVER_PORT`      | `port`             | `3001`           |
//! | `DATABASE_URL`     | `database_url`     | none (in-memory) |
//! | `JWT_SECRET`       | `jwt_secret`       | required         |
//! | `STORE_TIMEOUT_MS` | `store_timeout_ms` | `5000`           |
//! | `RUST_LOG`         | `log_filter`       | `info`           |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "BLOCKDOC_CONFIG";

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// SQLite URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Shared secret used to verify identity-provider tokens
    pub jwt_secret: String,
    /// Upper bound on any single store call
    pub store_timeout: Duration,
    /// `tracing-subscriber` env-filter directive
    pub log_filter: String,
}

/// Shape of the optional TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bind_addr: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub jwt_secret: Option<String>,
    pub store_timeout_ms: Option<u64>,
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load from the process environment, layering over `BLOCKDOC_CONFIG` if set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup (the environment, in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = match lookup(CONFIG_PATH_VAR) {
            Some(path) => AppConfigBuilder::from_file(path)?,
            None => AppConfigBuilder::default(),
        };

        if let Some(addr) = lookup("BIND_ADDR") {
            builder = builder.bind_ip(parse_ip("BIND_ADDR", &addr)?);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_number("SERVER_PORT", &port)?);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(ms) = lookup("STORE_TIMEOUT_MS") {
            builder = builder.store_timeout(Duration::from_millis(parse_number(
                "STORE_TIMEOUT_MS",
                &ms,
            )?));
        }
        if let Some(filter) = lookup("RUST_LOG") {
            builder = builder.log_filter(filter);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.store_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "store_timeout",
                message: "must be greater than zero".to_string(),
            });
        }
        if let Some(url) = &self.database_url {
            if !url.starts_with("sqlite:") {
                return Err(ConfigError::InvalidValue {
                    key: "database_url",
                    message: format!("only sqlite: URLs are supported, got '{}'", url),
                });
            }
        }
        Ok(())
    }
}

fn parse_ip(key: &'static str, value: &str) -> Result<IpAddr, ConfigError> {
    value.trim().parse().map_err(|e| ConfigError::InvalidValue {
        key,
        message: format!("{}", e),
    })
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        message: e.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Clone)]
pub struct AppConfigBuilder {
    bind_ip: IpAddr,
    port: u16,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    store_timeout: Duration,
    log_filter: String,
}

impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self {
            bind_ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: None,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfigBuilder {
    /// Start from the contents of a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(text)?;
        let mut builder = Self::default();
        if let Some(addr) = file.bind_addr {
            builder = builder.bind_ip(parse_ip("bind_addr", &addr)?);
        }
        if let Some(port) = file.port {
            builder = builder.port(port);
        }
        if let Some(url) = file.database_url {
            builder = builder.database_url(url);
        }
        if let Some(secret) = file.jwt_secret {
            builder = builder.jwt_secret(secret);
        }
        if let Some(ms) = file.store_timeout_ms {
            builder = builder.store_timeout(Duration::from_millis(ms));
        }
        if let Some(filter) = file.log_filter {
            builder = builder.log_filter(filter);
        }
        Ok(builder)
    }

    pub fn bind_ip(mut self, ip: IpAddr) -> Self {
        self.bind_ip = ip;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            bind_addr: SocketAddr::new(self.bind_ip, self.port),
            database_url: self.database_url,
            jwt_secret: self
                .jwt_secret
                .ok_or(ConfigError::MissingValue("jwt_secret"))?,
            store_timeout: self.store_timeout,
            log_filter: self.log_filter,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}
