//! SQL literal values produced by synthesis.

use serde::Serialize;
use std::fmt;

/// SQL value representation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Int(i64),
    Decimal(f64),
    Text(String),
}

impl SqlValue {
    /// Format as a SQL literal for an INSERT statement
    pub fn to_sql(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Decimal(n) => format!("{:.2}", n),
            SqlValue::Text(s) => format!("'{}'", escape_string(s)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Escape a string for a single-quoted SQL literal
fn escape_string(s: &str) -> String {
    s.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(SqlValue::Null.to_sql(), "NULL");
        assert_eq!(SqlValue::Int(42).to_sql(), "42");
        assert_eq!(SqlValue::Decimal(12.5).to_sql(), "12.50");
        assert_eq!(SqlValue::Text("abc".into()).to_sql(), "'abc'");
        assert_eq!(SqlValue::Text("O'Brien".into()).to_sql(), "'O''Brien'");
    }
}
