//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures of the host transports. Tool-level failures never reach here.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The listener could not bind its address.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP handshake with the client did not complete.
    #[error("Handshake failed: {0}")]
    Handshake(String),

    /// The transport stopped with an error after it was running.
    #[error("{transport} transport failed: {message}")]
    Serve {
        transport: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn handshake(err: impl std::fmt::Display) -> Self {
        Self::Handshake(err.to_string())
    }

    pub fn serve(transport: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Serve {
            transport,
            message: err.to_string(),
        }
    }
}
