//! Transport selection.
//!
//! `MCP_TRANSPORT` picks the transport (`stdio` or `http`); the HTTP
//! listener reads `MCP_HTTP_HOST`, `MCP_HTTP_PORT`, `MCP_HTTP_PATH` and
//! `MCP_HTTP_CORS`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Line-delimited JSON-RPC on stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// JSON-RPC over HTTP POST; the only transport that sees caller
    /// credentials.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP listener settings.
#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Route accepting JSON-RPC POSTs.
    pub rpc_path: String,
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rpc_path: "/mcp".to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Read the listener settings, keeping defaults for unset or invalid
    /// values.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(host) = env_var("MCP_HTTP_HOST") {
            config.host = host;
        }
        if let Some(port) = env_var("MCP_HTTP_PORT").and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        if let Some(path) = env_var("MCP_HTTP_PATH") {
            config.rpc_path = if path.starts_with('/') {
                path
            } else {
                format!("/{path}")
            };
        }
        if let Some(cors) = env_var("MCP_HTTP_CORS") {
            config.enable_cors = parse_flag(&cors).unwrap_or(config.enable_cors);
        }
        config
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            Self::Stdio
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            Self::Http(HttpConfig::default())
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

impl TransportConfig {
    /// Select the transport from `MCP_TRANSPORT`, falling back to the
    /// default for unknown or uncompiled transports.
    pub fn from_env() -> Self {
        match env_var("MCP_TRANSPORT").map(|t| t.to_lowercase()).as_deref() {
            #[cfg(feature = "http")]
            Some("http") => Self::Http(HttpConfig::from_env()),
            #[cfg(feature = "stdio")]
            Some("stdio") => Self::Stdio,
            Some(other) => {
                tracing::warn!("Transport '{}' not available, using default", other);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Human-readable summary for startup logs.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg_attr(not(feature = "http"), allow(dead_code))]
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
