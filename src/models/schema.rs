//! Wire shapes for the schema-modification tools.
//!
//! `create_table` and `add_column` accept column and index definitions in
//! camelCase, matching the advertised tool schemas.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Deserialize a field that distinguishes "absent" from an explicit null.
///
/// `DEFAULT NULL` is a meaningful column default, so `"default": null` must
/// survive as `Some(Value::Null)` rather than collapsing into `None`.
fn explicit_null<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

/// A column definition for create_table and add_column.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Column name
    pub name: String,
    /// SQL type name (e.g. "int", "varchar")
    #[serde(rename = "type")]
    pub column_type: String,
    /// Optional type length, rendered as TYPE(length)
    #[serde(default)]
    pub length: Option<u64>,
    /// NOT NULL when explicitly false
    #[serde(default)]
    pub nullable: Option<bool>,
    /// Default value literal; explicit null renders as DEFAULT NULL
    #[serde(default, deserialize_with = "explicit_null")]
    pub default: Option<JsonValue>,
    /// AUTO_INCREMENT marker
    #[serde(default)]
    pub auto_increment: bool,
    /// PRIMARY KEY marker
    #[serde(default)]
    pub primary: bool,
}

/// An index definition for create_table.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IndexDefinition {
    /// Index name
    pub name: String,
    /// Columns covered by the index, in order
    pub columns: Vec<String>,
    /// UNIQUE INDEX when true
    #[serde(default)]
    pub unique: bool,
}
