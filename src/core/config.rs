//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally via a `.env` file) with sensible defaults.
//! The resulting [`Config`] is immutable and shared behind an `Arc` by the
//! server, the tool registry and the API client.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Default base URL of the Notion REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// Default value sent in the `Notion-Version` header.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Name of the required environment variable holding the API token.
pub const API_TOKEN_VAR: &str = "NOTION_API_TOKEN";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream API configuration.
    pub api: ApiConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration of the upstream Notion API.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is resolved against.
    pub base_url: String,

    /// Default credential, used whenever the caller supplies none.
    #[serde(skip_serializing)]
    pub token: String,

    /// Value of the `Notion-Version` header.
    pub notion_version: String,

    /// Timeout applied to every outgoing request.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("notion_version", &self.notion_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ApiConfig {
    /// Create an API configuration with the given token and default settings.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Point the configuration at another base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Config {
    /// Create a configuration around the given API settings.
    ///
    /// All other sections take their default values.
    pub fn new(api: ApiConfig) -> Self {
        Self {
            server: ServerConfig {
                name: "notion-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            api,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `NOTION_API_TOKEN` is required; every other variable is optional.
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let token = std::env::var(API_TOKEN_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::config(format!("{API_TOKEN_VAR} must be set")))?;

        let mut config = Self::new(ApiConfig::with_token(token));

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("NOTION_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(version) = std::env::var("NOTION_VERSION") {
            config.api.notion_version = version;
        }

        if let Ok(timeout) = std::env::var("NOTION_TIMEOUT_SECS") {
            config.api.timeout_secs = timeout
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    Error::config(format!(
                        "NOTION_TIMEOUT_SECS must be a positive number of seconds, got '{timeout}'"
                    ))
                })?;
        }

        Ok(config)
    }
}
