//! Transport layer for the MCP server.
//!
//! Only the stdio transport is provided: the server is meant to be
//! launched as a child process by an MCP client.

pub mod stdio;

pub use stdio::StdioTransport;

use crate::error::DbResult;
use std::future::Future;

/// Trait for MCP transport implementations.
pub trait Transport: Send + Sync {
    /// Start the transport and begin handling requests.
    ///
    /// This method should block until the transport is shut down.
    fn run(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the name of this transport for logging.
    fn name(&self) -> &'static str;
}
