//! Prepared-statement execution against the MySQL connection.
//!
//! Thin wrappers over sqlx that bind positional parameters and decode result
//! rows. Driver errors are returned raw; the tool handlers wrap them with
//! operation context.

use crate::db::types::row_to_json_map;
use serde_json::Value as JsonValue;
use sqlx::MySql;
use sqlx::mysql::{MySqlArguments, MySqlConnection, MySqlQueryResult};
use sqlx::query::Query;

/// A positional statement parameter.
///
/// Tagged at the dispatch boundary from the untyped JSON the caller sends,
/// then bound through the prepared-statement API.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

fn bind_params<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &[SqlParam],
) -> Query<'q, MySql, MySqlArguments> {
    for param in params {
        query = match param {
            SqlParam::Null => query.bind(None::<String>),
            SqlParam::Bool(v) => query.bind(*v),
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Float(v) => query.bind(*v),
            SqlParam::String(v) => query.bind(v.clone()),
        };
    }
    query
}

/// Run a row-returning statement and decode every row to a JSON object.
pub async fn fetch_rows(
    conn: &mut MySqlConnection,
    sql: &str,
    params: &[SqlParam],
) -> Result<Vec<serde_json::Map<String, JsonValue>>, sqlx::Error> {
    let rows = bind_params(sqlx::query(sql), params)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.iter().map(row_to_json_map).collect())
}

/// Outcome of a mutation statement.
#[derive(Debug, Clone, Copy)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

impl From<MySqlQueryResult> for ExecOutcome {
    fn from(result: MySqlQueryResult) -> Self {
        Self {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        }
    }
}

/// Run a mutation or DDL statement.
pub async fn execute_statement(
    conn: &mut MySqlConnection,
    sql: &str,
    params: &[SqlParam],
) -> Result<ExecOutcome, sqlx::Error> {
    let result = bind_params(sqlx::query(sql), params)
        .execute(&mut *conn)
        .await?;
    Ok(result.into())
}
