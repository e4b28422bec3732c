//! Notion MCP Server Library
//!
//! Exposes the Notion REST API as a set of Model Context Protocol tools.
//! Every tool is a row in a declarative endpoint table; one generic
//! dispatch path renames arguments, places them in the path, query or body,
//! sends the request and normalizes the response into a tool outcome.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Endpoint descriptors, request adapter and API client
//!
//! # Example
//!
//! ```rust,no_run
//! use notion_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
