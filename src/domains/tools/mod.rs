//! Tools domain module.
//!
//! This module exposes the Notion REST API as MCP tools. Each tool is one
//! [`EndpointDescriptor`] in a declarative table; a single generic code path
//! handles every call.
//!
//! ## Architecture
//!
//! - `definitions/` - The endpoint table (one file per Notion object family)
//! - `descriptor.rs` - Endpoint descriptor model and input schemas
//! - `adapter.rs` - Path substitution, renaming and request preparation
//! - `client.rs` - Shared upstream HTTP client and credential resolution
//! - `outcome.rs` - Normalization of results and errors into tool outcomes
//! - `registry.rs` - Central tool registry and dispatch
//! - `router.rs` - rmcp ToolRouter builder for the STDIO transport
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! Declare a new `EndpointDescriptor` constant in `definitions/` and list it
//! in `ENDPOINTS`. Nothing else needs to change.

pub mod adapter;
pub mod client;
pub mod definitions;
pub mod descriptor;
mod error;
pub mod outcome;
mod registry;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;

pub use adapter::{Invocation, PreparedRequest};
pub use client::{ApiClient, bearer_token};
pub use descriptor::{EndpointDescriptor, FieldKind, FieldLocation, FieldSpec, HttpMethod};
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
