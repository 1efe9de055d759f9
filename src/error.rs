//! Error types for the MySQL/MongoDB MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Every failure a tool handler can produce maps onto one of the
//! JSON-RPC error kinds the MCP protocol understands: invalid_request (an
//! operation was attempted before the backend was configured), invalid_params
//! (malformed or missing caller arguments, or a guard violation),
//! internal_error (the backend driver failed). Unknown tool names are
//! rejected with method-not-found by the rmcp tool router itself.

use crate::models::BackendKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("{backend} configuration not set. Use the {} tool first.", backend.connect_tool())]
    NotConfigured { backend: BackendKind },

    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DbError {
    /// Create a not-configured error for the given backend kind.
    pub fn not_configured(backend: BackendKind) -> Self {
        Self::NotConfigured { backend }
    }

    /// Create an invalid-parameters error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// Every driver failure surfaces as an internal error wrapping the driver's
/// message; handlers add operation context before the conversion when they
/// have it.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::internal(err.to_string())
    }
}

/// Convert MongoDB driver errors to DbError.
impl From<mongodb::error::Error> for DbError {
    fn from(err: mongodb::error::Error) -> Self {
        DbError::internal(err.to_string())
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Convert DbError to MCP ErrorData for semantic error categorization.
impl From<DbError> for rmcp::ErrorData {
    fn from(err: DbError) -> Self {
        match &err {
            DbError::NotConfigured { .. } => {
                rmcp::ErrorData::invalid_request(err.to_string(), None)
            }
            DbError::InvalidParams { .. } => rmcp::ErrorData::invalid_params(err.to_string(), None),
            DbError::Internal { .. } => rmcp::ErrorData::internal_error(err.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_display_names_connect_tool() {
        let err = DbError::not_configured(BackendKind::MySql);
        assert_eq!(
            err.to_string(),
            "MySQL configuration not set. Use the connect_db tool first."
        );

        let err = DbError::not_configured(BackendKind::Mongo);
        assert_eq!(
            err.to_string(),
            "MongoDB configuration not set. Use the connect_mongodb tool first."
        );
    }

    #[test]
    fn test_not_configured_maps_to_invalid_request() {
        let err = DbError::not_configured(BackendKind::MySql);
        let mcp_err: rmcp::ErrorData = err.into();
        // invalid_request uses -32600
        assert_eq!(mcp_err.code.0, -32600);
    }

    #[test]
    fn test_invalid_params_maps_to_invalid_params() {
        let err = DbError::invalid_params("SQL query is required");
        let mcp_err: rmcp::ErrorData = err.into();
        // invalid_params uses -32602
        assert_eq!(mcp_err.code.0, -32602);
        assert!(mcp_err.message.contains("SQL query is required"));
    }

    #[test]
    fn test_internal_maps_to_internal_error() {
        let err = DbError::internal("connection refused");
        let mcp_err: rmcp::ErrorData = err.into();
        // internal_error uses -32603
        assert_eq!(mcp_err.code.0, -32603);
    }

    #[test]
    fn test_internal_wraps_backend_message() {
        let err = DbError::internal("Query execution failed: table missing");
        assert!(err.to_string().contains("table missing"));
    }
}
