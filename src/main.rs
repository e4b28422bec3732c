//! Notion MCP server entry point.
//!
//! Loads configuration, initializes logging on stderr and serves the Notion
//! tools over the configured transport.

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use notion_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Upstream API: {}", config.api.base_url);

    let server = McpServer::new(config.clone()).context("failed to initialize server")?;

    info!("Server initialized with {} tools", server.registry().descriptors().len());

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Install the tracing subscriber on stderr; stdout belongs to the STDIO
/// transport. `RUST_LOG` directives are honored on top of `level`.
fn init_logging(level: &str) {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
