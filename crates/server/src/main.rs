//! godoc-mcp server entry point.
//!
//! Boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use godoc_client::GoDocClient;
use godoc_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let client = GoDocClient::new(&config).context("failed to build documentation client")?;

    tracing::info!(base_url = %config.base_url, "Starting godoc-mcp server on stdio transport");

    let handler = handler::GoDocServer::new(Arc::new(client));
    let server = serve_server(handler, stdio()).await?;

    server.waiting().await?;

    Ok(())
}
