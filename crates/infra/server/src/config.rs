//! Server configuration.

use activity_analytics_core::StatusThresholds;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "ACTIVITY_ANALYTICS_CONFIG";

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listener and logging settings.
    pub server: ServerConfig,
    /// Classification thresholds.
    pub analytics: StatusThresholds,
}

/// Server-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Host to bind to.
    pub host: String,
    /// Log level, used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::ParseError(e.to_string()))
    }
}

/// Loads configuration from a TOML file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let content =
        std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError(e.to_string()))?;
    parse_config(&content)
}

/// Parses configuration from TOML text. Missing sections take their defaults.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
}
