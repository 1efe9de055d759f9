//! Statement-kind guards for the query and execute tools.
//!
//! The contract is a prefix check on the trimmed statement text: `query`
//! accepts only statements beginning with SELECT (case-insensitive), and
//! `execute` accepts everything but.

use crate::error::{DbError, DbResult};

fn starts_with_select(sql: &str) -> bool {
    // Compare raw bytes: slicing the str by byte index would panic when a
    // multibyte character straddles the boundary.
    sql.trim()
        .as_bytes()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"select"))
}

/// Guard for the query tool: the statement must be a SELECT.
pub fn require_select(sql: &str) -> DbResult<()> {
    if sql.trim().is_empty() {
        return Err(DbError::invalid_params("SQL query is required"));
    }
    if !starts_with_select(sql) {
        return Err(DbError::invalid_params(
            "Only SELECT queries are allowed with query tool",
        ));
    }
    Ok(())
}

/// Guard for the execute tool: the statement must not be a SELECT.
pub fn reject_select(sql: &str) -> DbResult<()> {
    if sql.trim().is_empty() {
        return Err(DbError::invalid_params("SQL query is required"));
    }
    if starts_with_select(sql) {
        return Err(DbError::invalid_params(
            "Use query tool for SELECT statements",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_select_accepts_lowercase() {
        assert!(require_select("select * from t").is_ok());
    }

    #[test]
    fn test_require_select_accepts_leading_whitespace() {
        assert!(require_select("   SELECT 1").is_ok());
        assert!(require_select("\n\tSeLeCt 1").is_ok());
    }

    #[test]
    fn test_require_select_rejects_delete() {
        let err = require_select("DELETE FROM t").unwrap_err();
        assert!(matches!(err, DbError::InvalidParams { .. }));
        assert!(err.to_string().contains("Only SELECT"));
    }

    #[test]
    fn test_require_select_rejects_empty() {
        let err = require_select("   ").unwrap_err();
        assert!(err.to_string().contains("SQL query is required"));
    }

    #[test]
    fn test_reject_select_accepts_delete() {
        assert!(reject_select("DELETE FROM t").is_ok());
        assert!(reject_select("INSERT INTO t VALUES (1)").is_ok());
    }

    #[test]
    fn test_reject_select_rejects_select() {
        let err = reject_select("  select 1").unwrap_err();
        assert!(matches!(err, DbError::InvalidParams { .. }));
        assert!(err.to_string().contains("Use query tool"));
    }

    #[test]
    fn test_reject_select_rejects_empty() {
        assert!(reject_select("").is_err());
    }

    #[test]
    fn test_multibyte_prefix_is_classified_not_panicking() {
        // Byte 6 falls inside a multibyte character here
        let err = require_select("sele日本").unwrap_err();
        assert!(matches!(err, DbError::InvalidParams { .. }));
        assert!(reject_select("sele日本").is_ok());
    }

    #[test]
    fn test_select_with_multibyte_body() {
        assert!(require_select("select '日本' FROM t").is_ok());
        assert!(require_select("sélect 1").is_err());
    }
}
