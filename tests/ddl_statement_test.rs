//! Integration tests for DDL statement building.
//!
//! These tests drive the create_table/add_column pipeline from the JSON wire
//! shapes through to the generated SQL text.

use mysql_mongo_mcp_server::db::ddl::{build_add_column, build_create_table};
use mysql_mongo_mcp_server::models::{FieldDefinition, IndexDefinition};

#[test]
fn test_create_table_from_wire_shape() {
    let fields: Vec<FieldDefinition> = serde_json::from_str(
        r#"[
            {"name": "id", "type": "int", "autoIncrement": true, "primary": true},
            {"name": "email", "type": "varchar", "length": 255, "nullable": false},
            {"name": "active", "type": "boolean", "default": true}
        ]"#,
    )
    .unwrap();
    let indexes: Vec<IndexDefinition> = serde_json::from_str(
        r#"[{"name": "uq_email", "columns": ["email"], "unique": true}]"#,
    )
    .unwrap();

    let sql = build_create_table("users", &fields, &indexes);
    assert!(sql.starts_with("CREATE TABLE `users` ("));
    assert!(sql.contains("`id` INT AUTO_INCREMENT PRIMARY KEY"));
    assert!(sql.contains("`email` VARCHAR(255) NOT NULL"));
    assert!(sql.contains("`active` BOOLEAN DEFAULT TRUE"));
    assert!(sql.contains("UNIQUE INDEX `uq_email` (`email`)"));
}

#[test]
fn test_create_table_explicit_null_default() {
    // "default": null must render DEFAULT NULL; an absent key must not
    let fields: Vec<FieldDefinition> = serde_json::from_str(
        r#"[
            {"name": "note", "type": "text", "default": null},
            {"name": "body", "type": "text"}
        ]"#,
    )
    .unwrap();

    let sql = build_create_table("posts", &fields, &[]);
    assert!(sql.contains("`note` TEXT DEFAULT NULL"));
    assert!(sql.contains("`body` TEXT"));
    assert!(!sql.contains("`body` TEXT DEFAULT"));
}

#[test]
fn test_create_table_quotes_awkward_identifiers() {
    let fields: Vec<FieldDefinition> =
        serde_json::from_str(r#"[{"name": "select", "type": "int"}]"#).unwrap();

    let sql = build_create_table("order", &fields, &[]);
    assert!(sql.contains("CREATE TABLE `order`"));
    assert!(sql.contains("`select` INT"));
}

#[test]
fn test_add_column_from_wire_shape() {
    let field: FieldDefinition = serde_json::from_str(
        r#"{"name": "score", "type": "decimal", "length": 10, "nullable": false, "default": 0}"#,
    )
    .unwrap();

    let sql = build_add_column("games", &field);
    assert_eq!(
        sql,
        "ALTER TABLE `games` ADD COLUMN `score` DECIMAL(10) NOT NULL DEFAULT 0"
    );
}

#[test]
fn test_string_default_escapes_quotes() {
    let field: FieldDefinition = serde_json::from_str(
        r#"{"name": "label", "type": "varchar", "length": 64, "default": "it's"}"#,
    )
    .unwrap();

    let sql = build_add_column("tags", &field);
    assert!(sql.contains("DEFAULT 'it''s'"));
}
