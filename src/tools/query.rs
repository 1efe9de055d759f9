//! Query and execute tools for the MySQL backend.
//!
//! `query` runs SELECT statements and returns the rows pretty-printed as
//! JSON; `execute` runs mutation statements (INSERT/UPDATE/DELETE/DDL) and
//! reports the driver's outcome. Both accept positional parameters bound
//! through prepared statements.

use crate::db::{executor, DbSession, SqlParam};
use crate::error::{DbError, DbResult};
use crate::tools::guard;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// A positional parameter value in a tool call.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum QueryParamInput {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// String value
    String(String),
}

impl From<QueryParamInput> for SqlParam {
    fn from(input: QueryParamInput) -> Self {
        match input {
            QueryParamInput::Null => SqlParam::Null,
            QueryParamInput::Bool(v) => SqlParam::Bool(v),
            QueryParamInput::Int(v) => SqlParam::Int(v),
            QueryParamInput::Float(v) => SqlParam::Float(v),
            QueryParamInput::String(v) => SqlParam::String(v),
        }
    }
}

/// Input for the query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryInput {
    /// SQL SELECT statement
    pub sql: String,
    /// Positional parameters for ? placeholders (optional)
    #[serde(default)]
    pub params: Vec<QueryParamInput>,
}

/// Input for the execute tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteInput {
    /// SQL statement (INSERT, UPDATE, DELETE, DDL)
    pub sql: String,
    /// Positional parameters for ? placeholders (optional)
    #[serde(default)]
    pub params: Vec<QueryParamInput>,
}

/// Handler for query and execute.
pub struct QueryToolHandler {
    session: Arc<DbSession>,
}

impl QueryToolHandler {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self { session }
    }

    /// Handle the query tool call: SELECT statements only.
    pub async fn query(&self, input: QueryInput) -> DbResult<String> {
        let mut conn = self.session.mysql_conn().await?;
        guard::require_select(&input.sql)?;

        let params: Vec<SqlParam> = input.params.into_iter().map(Into::into).collect();
        let rows = executor::fetch_rows(&mut conn, &input.sql, &params)
            .await
            .map_err(|e| DbError::internal(format!("Query execution failed: {}", e)))?;

        info!(row_count = rows.len(), "Query executed");
        serde_json::to_string_pretty(&rows)
            .map_err(|e| DbError::internal(format!("Failed to serialize rows: {}", e)))
    }

    /// Handle the execute tool call: everything except SELECT.
    pub async fn execute(&self, input: ExecuteInput) -> DbResult<String> {
        let mut conn = self.session.mysql_conn().await?;
        guard::reject_select(&input.sql)?;

        let params: Vec<SqlParam> = input.params.into_iter().map(Into::into).collect();
        let outcome = executor::execute_statement(&mut conn, &input.sql, &params)
            .await
            .map_err(|e| DbError::internal(format!("Query execution failed: {}", e)))?;

        info!(
            rows_affected = outcome.rows_affected,
            "Statement executed"
        );
        serde_json::to_string_pretty(&json!({
            "rows_affected": outcome.rows_affected,
            "last_insert_id": outcome.last_insert_id,
        }))
        .map_err(|e| DbError::internal(format!("Failed to serialize result: {}", e)))
    }
}
