//! Schema tools for the MySQL backend: list_tables, describe_table,
//! create_table, add_column.
//!
//! Introspection results are pretty-printed JSON; schema modifications
//! return a confirmation message. DDL statements are built by the ddl
//! module's quoting routines.

use crate::db::{ddl, executor, DbSession};
use crate::error::{DbError, DbResult};
use crate::models::{FieldDefinition, IndexDefinition};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the describe_table tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DescribeTableInput {
    /// Table name
    pub table: String,
}

/// Input for the create_table tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTableInput {
    /// Table name
    pub table: String,
    /// Column definitions, in order
    pub fields: Vec<FieldDefinition>,
    /// Index definitions (optional)
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
}

/// Input for the add_column tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddColumnInput {
    /// Table name
    pub table: String,
    /// Column definition
    pub field: FieldDefinition,
}

/// Handler for the schema tools.
pub struct SchemaToolHandler {
    session: Arc<DbSession>,
}

impl SchemaToolHandler {
    pub fn new(session: Arc<DbSession>) -> Self {
        Self { session }
    }

    /// Handle list_tables: fixed introspection statement.
    pub async fn list_tables(&self) -> DbResult<String> {
        let mut conn = self.session.mysql_conn().await?;
        let rows = executor::fetch_rows(&mut conn, "SHOW TABLES", &[])
            .await
            .map_err(|e| DbError::internal(format!("Failed to list tables: {}", e)))?;
        serde_json::to_string_pretty(&rows)
            .map_err(|e| DbError::internal(format!("Failed to serialize rows: {}", e)))
    }

    /// Handle describe_table: DESCRIBE with a quoted identifier.
    pub async fn describe_table(&self, input: DescribeTableInput) -> DbResult<String> {
        let mut conn = self.session.mysql_conn().await?;
        if input.table.trim().is_empty() {
            return Err(DbError::invalid_params("Table name is required"));
        }

        let sql = format!("DESCRIBE {}", ddl::quote_ident(&input.table));
        let rows = executor::fetch_rows(&mut conn, &sql, &[])
            .await
            .map_err(|e| DbError::internal(format!("Failed to describe table: {}", e)))?;
        serde_json::to_string_pretty(&rows)
            .map_err(|e| DbError::internal(format!("Failed to serialize rows: {}", e)))
    }

    /// Handle create_table: one CREATE TABLE statement from the declared
    /// column and index definitions.
    pub async fn create_table(&self, input: CreateTableInput) -> DbResult<String> {
        let mut conn = self.session.mysql_conn().await?;
        if input.table.trim().is_empty() {
            return Err(DbError::invalid_params("Table name is required"));
        }
        if input.fields.is_empty() {
            return Err(DbError::invalid_params(
                "At least one field definition is required",
            ));
        }

        let sql = ddl::build_create_table(&input.table, &input.fields, &input.indexes);
        executor::execute_statement(&mut conn, &sql, &[])
            .await
            .map_err(|e| DbError::internal(format!("Failed to create table: {}", e)))?;

        info!(table = %input.table, "Table created");
        Ok(format!("Table {} created successfully", input.table))
    }

    /// Handle add_column: one ALTER TABLE ... ADD COLUMN statement.
    pub async fn add_column(&self, input: AddColumnInput) -> DbResult<String> {
        let mut conn = self.session.mysql_conn().await?;
        if input.table.trim().is_empty() {
            return Err(DbError::invalid_params("Table name and field are required"));
        }

        let sql = ddl::build_add_column(&input.table, &input.field);
        executor::execute_statement(&mut conn, &sql, &[])
            .await
            .map_err(|e| DbError::internal(format!("Failed to add column: {}", e)))?;

        info!(table = %input.table, column = %input.field.name, "Column added");
        Ok(format!(
            "Column {} added to table {}",
            input.field.name, input.table
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BackendKind;

    fn unconfigured_handler() -> SchemaToolHandler {
        SchemaToolHandler::new(Arc::new(DbSession::new("mongodb://localhost:27017")))
    }

    #[tokio::test]
    async fn test_list_tables_before_connect_is_invalid_request() {
        let err = unconfigured_handler().list_tables().await.unwrap_err();
        assert!(matches!(
            err,
            DbError::NotConfigured {
                backend: BackendKind::MySql
            }
        ));
    }

    #[tokio::test]
    async fn test_describe_table_before_connect_is_invalid_request() {
        let input = DescribeTableInput {
            table: "users".to_string(),
        };
        let err = unconfigured_handler()
            .describe_table(input)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotConfigured { .. }));
    }

    #[test]
    fn test_create_table_input_deserialization() {
        let json = r#"{
            "table": "users",
            "fields": [
                {"name": "id", "type": "int", "autoIncrement": true, "primary": true},
                {"name": "name", "type": "varchar", "length": 255, "nullable": false}
            ],
            "indexes": [{"name": "uq_name", "columns": ["name"], "unique": true}]
        }"#;
        let input: CreateTableInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.fields.len(), 2);
        assert_eq!(input.indexes.len(), 1);
        assert!(input.fields[0].auto_increment);
        assert_eq!(input.fields[1].length, Some(255));
    }

    #[test]
    fn test_add_column_input_deserialization() {
        let json = r#"{"table": "users", "field": {"name": "age", "type": "int"}}"#;
        let input: AddColumnInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.field.name, "age");
    }
}
