//! Configuration handling via CLI arguments and environment variables.

use clap::Parser;

use crate::models::DEFAULT_MONGODB_URI;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the MySQL/MongoDB MCP Server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mysql-mongo-mcp-server",
    about = "MCP server exposing MySQL and MongoDB operations to AI assistants",
    version,
    author
)]
pub struct Config {
    /// Default MongoDB server address, used when connect_mongodb is called
    /// with only a database name
    #[arg(
        long,
        default_value = DEFAULT_MONGODB_URI,
        env = "MONGODB_URI"
    )]
    pub mongodb_uri: String,

    /// MySQL connection timeout in seconds, carried into every resolved
    /// connection configuration
    #[arg(
        long,
        default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS,
        env = "MCP_CONNECT_TIMEOUT"
    )]
    pub connect_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT_SECS,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
