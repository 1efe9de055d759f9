//! DDL statement building for create_table and add_column.
//!
//! Identifiers and default-value literals are rendered through dedicated
//! quoting routines rather than raw interpolation: embedded backticks in
//! identifiers are doubled, string literals are single-quoted with embedded
//! quotes doubled, numbers and booleans render bare, and JSON null renders
//! as the NULL keyword.

use crate::models::{FieldDefinition, IndexDefinition};
use serde_json::Value as JsonValue;

/// Quote a MySQL identifier with backticks, doubling any embedded backtick.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Render a default-value literal.
pub fn quote_literal(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::Bool(true) => "TRUE".to_string(),
        JsonValue::Bool(false) => "FALSE".to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => format!("'{}'", s.replace('\'', "''")),
        // Arrays and objects become quoted JSON text
        other => format!(
            "'{}'",
            serde_json::to_string(other)
                .unwrap_or_default()
                .replace('\'', "''")
        ),
    }
}

/// Render one column definition:
/// `` `name` TYPE[(length)] [NOT NULL] [DEFAULT lit] [AUTO_INCREMENT] [PRIMARY KEY] ``
pub fn column_definition(field: &FieldDefinition) -> String {
    let mut def = format!(
        "{} {}",
        quote_ident(&field.name),
        field.column_type.to_uppercase()
    );
    if let Some(length) = field.length {
        def.push_str(&format!("({})", length));
    }
    if field.nullable == Some(false) {
        def.push_str(" NOT NULL");
    }
    if let Some(default) = &field.default {
        def.push_str(&format!(" DEFAULT {}", quote_literal(default)));
    }
    if field.auto_increment {
        def.push_str(" AUTO_INCREMENT");
    }
    if field.primary {
        def.push_str(" PRIMARY KEY");
    }
    def
}

/// Render one index definition: `[UNIQUE ]INDEX `name` (`col`, ...)`.
pub fn index_definition(index: &IndexDefinition) -> String {
    let kind = if index.unique { "UNIQUE INDEX" } else { "INDEX" };
    let columns = index
        .columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} {} ({})", kind, quote_ident(&index.name), columns)
}

/// Build a CREATE TABLE statement from column and index definitions, in
/// declared order.
pub fn build_create_table(
    table: &str,
    fields: &[FieldDefinition],
    indexes: &[IndexDefinition],
) -> String {
    let definitions: Vec<String> = fields
        .iter()
        .map(column_definition)
        .chain(indexes.iter().map(index_definition))
        .collect();

    format!(
        "CREATE TABLE {} (\n  {}\n)",
        quote_ident(table),
        definitions.join(",\n  ")
    )
}

/// Build an ALTER TABLE ... ADD COLUMN statement.
pub fn build_add_column(table: &str, field: &FieldDefinition) -> String {
    format!(
        "ALTER TABLE {} ADD COLUMN {}",
        quote_ident(table),
        column_definition(field)
    )
}
