//! MySQL/MongoDB MCP Server - Main entry point.
//!
//! This server provides MCP (Model Context Protocol) tools for AI assistants
//! to interact with MySQL and MongoDB databases over stdio.

use clap::Parser;
use mysql_mongo_mcp_server::config::Config;
use mysql_mongo_mcp_server::db::DbSession;
use mysql_mongo_mcp_server::transport::{StdioTransport, Transport};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr: stdout carries the MCP protocol stream.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    info!(
        "Starting MySQL/MongoDB MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Shared connection state; both backends start Unconfigured and are
    // set up on demand through the connect tools
    let session = Arc::new(
        DbSession::new(config.mongodb_uri.clone())
            .with_mysql_connect_timeout(config.connect_timeout),
    );

    let transport = StdioTransport::new(session);
    if let Err(e) = transport.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
