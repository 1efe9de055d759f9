//! MySQL column value decoding.
//!
//! Query results are shaped into JSON before being pretty-printed into the
//! tool response. Type conversion uses a two-phase approach: `TypeCategory`
//! classifies the column's MySQL type name into a logical category, then a
//! per-category decoder extracts the value.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::mysql::{MySqlRow, MySqlTypeInfo, MySqlValueRef};
use sqlx::{Column, Decode, Row, Type, TypeInfo};

/// Logical category for MySQL column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Integer,
    Float,
    Decimal,
    Boolean,
    Binary,
    Json,
    Temporal,
    Text,
}

/// Classify a MySQL type name into a logical category.
pub fn categorize_type(type_name: &str) -> TypeCategory {
    let lower = type_name.to_lowercase();

    if lower.contains("decimal") || lower.contains("numeric") {
        return TypeCategory::Decimal;
    }
    // TINYINT(1) is reported as BOOLEAN by the driver
    if lower == "bool" || lower == "boolean" {
        return TypeCategory::Boolean;
    }
    if lower.contains("int") || lower == "year" {
        return TypeCategory::Integer;
    }
    if lower.contains("float") || lower.contains("double") {
        return TypeCategory::Float;
    }
    if lower == "json" {
        return TypeCategory::Json;
    }
    if lower.contains("blob") || lower.contains("binary") {
        return TypeCategory::Binary;
    }
    if matches!(lower.as_str(), "date" | "time" | "datetime" | "timestamp") {
        return TypeCategory::Temporal;
    }
    // varchar, char, text, enum, set, ...
    TypeCategory::Text
}

/// Wrapper type for raw DECIMAL/NUMERIC values as strings.
/// This preserves the exact database representation.
#[derive(Debug)]
pub struct RawDecimal(pub String);

impl Type<sqlx::MySql> for RawDecimal {
    fn type_info() -> MySqlTypeInfo {
        <String as Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        let name = ty.name().to_lowercase();
        name.contains("decimal") || name.contains("numeric")
    }
}

impl<'r> Decode<'r, sqlx::MySql> for RawDecimal {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<sqlx::MySql>>::decode(value)?;
        Ok(RawDecimal(s.to_string()))
    }
}

/// Decode binary data to JSON: UTF-8 text when valid, base64 otherwise.
pub fn decode_binary_value(bytes: &[u8]) -> JsonValue {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    match std::str::from_utf8(bytes) {
        Ok(s) => JsonValue::String(s.to_string()),
        Err(_) => JsonValue::String(STANDARD.encode(bytes)),
    }
}

/// Convert a MySQL row into a JSON object keyed by column name.
pub fn row_to_json_map(row: &MySqlRow) -> serde_json::Map<String, JsonValue> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, col)| {
            let type_name = col.type_info().name();
            let category = categorize_type(type_name);
            (col.name().to_string(), decode_column(row, idx, category))
        })
        .collect()
}

fn decode_column(row: &MySqlRow, idx: usize, category: TypeCategory) -> JsonValue {
    match category {
        TypeCategory::Decimal => decode_decimal(row, idx),
        TypeCategory::Integer => decode_integer(row, idx),
        TypeCategory::Boolean => decode_boolean(row, idx),
        TypeCategory::Float => decode_float(row, idx),
        TypeCategory::Binary => decode_binary_col(row, idx),
        TypeCategory::Json => decode_json(row, idx),
        TypeCategory::Temporal => decode_temporal(row, idx),
        TypeCategory::Text => decode_text(row, idx),
    }
}

fn decode_decimal(row: &MySqlRow, idx: usize) -> JsonValue {
    match row.try_get::<Option<RawDecimal>, _>(idx) {
        Ok(Some(v)) => JsonValue::String(v.0),
        Ok(None) => JsonValue::Null,
        Err(e) => {
            tracing::error!("Failed to decode DECIMAL: {:?}", e);
            JsonValue::Null
        }
    }
}

fn decode_integer(row: &MySqlRow, idx: usize) -> JsonValue {
    if let Ok(None) = row.try_get::<Option<i64>, _>(idx) {
        return JsonValue::Null;
    }
    // Try signed widths first, then unsigned
    if let Ok(Some(v)) = row.try_get::<Option<i8>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<i16>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<i32>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u8>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u16>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u32>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    if let Ok(Some(v)) = row.try_get::<Option<u64>, _>(idx) {
        return JsonValue::Number(v.into());
    }
    JsonValue::Null
}

fn decode_boolean(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<bool>, _>(idx)
        .ok()
        .flatten()
        .map(JsonValue::Bool)
        .unwrap_or(JsonValue::Null)
}

fn decode_float(row: &MySqlRow, idx: usize) -> JsonValue {
    if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(idx) {
        return serde_json::Number::from_f64(v)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(v.to_string()));
    }
    if let Ok(Some(v)) = row.try_get::<Option<f32>, _>(idx) {
        return serde_json::Number::from_f64(v as f64)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(v.to_string()));
    }
    JsonValue::Null
}

fn decode_binary_col(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<Vec<u8>>, _>(idx)
        .ok()
        .flatten()
        .map(|v| decode_binary_value(&v))
        .unwrap_or(JsonValue::Null)
}

fn decode_json(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<serde_json::Value>, _>(idx)
        .ok()
        .flatten()
        .unwrap_or(JsonValue::Null)
}

fn decode_temporal(row: &MySqlRow, idx: usize) -> JsonValue {
    if let Ok(Some(v)) = row.try_get::<Option<DateTime<Utc>>, _>(idx) {
        return JsonValue::String(v.to_rfc3339());
    }
    if let Ok(Some(v)) = row.try_get::<Option<NaiveDateTime>, _>(idx) {
        return JsonValue::String(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<NaiveDate>, _>(idx) {
        return JsonValue::String(v.to_string());
    }
    if let Ok(Some(v)) = row.try_get::<Option<NaiveTime>, _>(idx) {
        return JsonValue::String(v.to_string());
    }
    JsonValue::Null
}

fn decode_text(row: &MySqlRow, idx: usize) -> JsonValue {
    row.try_get::<Option<String>, _>(idx)
        .ok()
        .flatten()
        .map(JsonValue::String)
        .unwrap_or(JsonValue::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_type_integer() {
        assert_eq!(categorize_type("INT"), TypeCategory::Integer);
        assert_eq!(categorize_type("BIGINT"), TypeCategory::Integer);
        assert_eq!(categorize_type("TINYINT UNSIGNED"), TypeCategory::Integer);
        assert_eq!(categorize_type("YEAR"), TypeCategory::Integer);
    }

    #[test]
    fn test_categorize_type_boolean_before_integer() {
        assert_eq!(categorize_type("BOOLEAN"), TypeCategory::Boolean);
    }

    #[test]
    fn test_categorize_type_decimal() {
        assert_eq!(categorize_type("DECIMAL"), TypeCategory::Decimal);
        assert_eq!(categorize_type("NEWDECIMAL"), TypeCategory::Decimal);
    }

    #[test]
    fn test_categorize_type_temporal() {
        assert_eq!(categorize_type("DATETIME"), TypeCategory::Temporal);
        assert_eq!(categorize_type("TIMESTAMP"), TypeCategory::Temporal);
        assert_eq!(categorize_type("DATE"), TypeCategory::Temporal);
        assert_eq!(categorize_type("TIME"), TypeCategory::Temporal);
    }

    #[test]
    fn test_categorize_type_binary_and_json() {
        assert_eq!(categorize_type("BLOB"), TypeCategory::Binary);
        assert_eq!(categorize_type("VARBINARY"), TypeCategory::Binary);
        assert_eq!(categorize_type("JSON"), TypeCategory::Json);
    }

    #[test]
    fn test_categorize_type_text_fallback() {
        assert_eq!(categorize_type("VARCHAR"), TypeCategory::Text);
        assert_eq!(categorize_type("ENUM"), TypeCategory::Text);
    }

    #[test]
    fn test_decode_binary_value_utf8() {
        assert_eq!(
            decode_binary_value(b"hello"),
            JsonValue::String("hello".to_string())
        );
    }

    #[test]
    fn test_decode_binary_value_falls_back_to_base64() {
        let bytes: &[u8] = &[0xFF, 0xFE, 0x00, 0x01];
        assert_eq!(
            decode_binary_value(bytes),
            JsonValue::String("//4AAQ==".to_string())
        );
    }
}
