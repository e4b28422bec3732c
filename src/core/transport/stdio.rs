//! STDIO transport implementation.
//!
//! The default MCP mode. Tool calls arriving here carry no caller
//! credential, so every request uses the configured API token.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve `server` over stdin/stdout until the client disconnects.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!(
            tools = server.registry().descriptors().len(),
            "Ready - communicating via stdin/stdout"
        );

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(TransportError::handshake)?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::serve("STDIO", e))?;

        info!("STDIO transport finished: {:?}", reason);
        Ok(())
    }
}
