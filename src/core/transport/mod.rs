//! Host transports carrying MCP JSON-RPC to and from the server.
//!
//! `stdio` (default feature) speaks MCP over stdin/stdout through rmcp.
//! `http` serves JSON-RPC over POST with axum and is the only transport
//! that sees request headers, so only it can forward a caller's
//! `Authorization: Bearer <token>` to the upstream API.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

#[cfg(feature = "http")]
pub use config::HttpConfig;
pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
