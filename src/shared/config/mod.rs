//! Server configuration module
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file by the binary) or assembled with [`ServerConfig::builder`].
//!
//! | Variable | Default |
//! |---|---|
//! | `PORT` | `8080` |
//! | `DATABASE_URL` | unset, documents are kept in memory |
//! | `OUTBOUND_QUEUE_CAPACITY` | `256` |
//! | `MAX_MESSAGE_BYTES` | `524288` (512 KiB) |
//! | `WRITE_TIMEOUT_SECS` | `10` |

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;
/// Default number of frames buffered per session before it is evicted
pub const DEFAULT_OUTBOUND_QUEUE_CAPACITY: usize = 256;
/// Default maximum inbound message size
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 512 * 1024;
/// Default per-write timeout on the outbound side of a session
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port the HTTP server listens on
    pub port: u16,
    /// PostgreSQL connection string; `None` keeps documents in memory
    pub database_url: Option<String>,
    /// Bounded outbound queue size per session
    pub outbound_queue_capacity: usize,
    /// Maximum accepted inbound message size in bytes
    pub max_message_bytes: usize,
    /// Timeout applied to every outbound write
    pub write_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            outbound_queue_capacity: DEFAULT_OUTBOUND_QUEUE_CAPACITY,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Missing keys fall back to defaults; empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(port) = get("PORT") {
            builder = builder.port(parse_value("PORT", &port)?);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(capacity) = get("OUTBOUND_QUEUE_CAPACITY") {
            builder = builder.outbound_queue_capacity(parse_value("OUTBOUND_QUEUE_CAPACITY", &capacity)?);
        }
        if let Some(max) = get("MAX_MESSAGE_BYTES") {
            builder = builder.max_message_bytes(parse_value("MAX_MESSAGE_BYTES", &max)?);
        }
        if let Some(secs) = get("WRITE_TIMEOUT_SECS") {
            builder = builder.write_timeout(Duration::from_secs(parse_value("WRITE_TIMEOUT_SECS", &secs)?));
        }
        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.outbound_queue_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "OUTBOUND_QUEUE_CAPACITY",
                value: "0".to_string(),
            });
        }
        if self.max_message_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_MESSAGE_BYTES",
                value: "0".to_string(),
            });
        }
        if self.write_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "WRITE_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    outbound_queue_capacity: Option<usize>,
    max_message_bytes: Option<usize>,
    write_timeout: Option<Duration>,
}

impl ServerConfigBuilder {
    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the per-session outbound queue size
    pub fn outbound_queue_capacity(mut self, capacity: usize) -> Self {
        self.outbound_queue_capacity = Some(capacity);
        self
    }

    /// Set the maximum inbound message size
    pub fn max_message_bytes(mut self, max: usize) -> Self {
        self.max_message_bytes = Some(max);
        self
    }

    /// Set the outbound write timeout
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let defaults = ServerConfig::default();
        let config = ServerConfig {
            port: self.port.unwrap_or(defaults.port),
            database_url: self.database_url,
            outbound_queue_capacity: self
                .outbound_queue_capacity
                .unwrap_or(defaults.outbound_queue_capacity),
            max_message_bytes: self.max_message_bytes.unwrap_or(defaults.max_message_bytes),
            write_timeout: self.write_timeout.unwrap_or(defaults.write_timeout),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting could not be parsed or is out of range
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Environment variable or field name
        key: &'static str,
        /// The rejected value as given
        value: String,
    },
}
