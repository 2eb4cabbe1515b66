//! Generated cell values.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single generated cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Integer value (also used for booleans and counters).
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Text value (also used for dates and enum options).
    Text(String),
}

impl Value {
    /// Parses a user-supplied literal: integer, then float, then text.
    /// Surrounding single or double quotes force text.
    #[must_use]
    pub fn parse_literal(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("null") {
            return Self::Null;
        }
        for quote in ['\'', '"'] {
            if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
                return Self::Text(raw[1..raw.len() - 1].to_string());
            }
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Integer(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return Self::Float(f);
            }
        }
        Self::Text(raw.to_string())
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Renders the value as a SQL literal.
    #[must_use]
    pub fn to_sql_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Integer(v) => v.to_string(),
            Self::Float(v) => format!("{v}"),
            Self::Text(v) => format!("'{}'", v.replace('\'', "''")),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// One generated row: column name to value, in column order.
pub type Row = IndexMap<String, Value>;

/// Generated rows per table, in generation order.
pub type GeneratedData = IndexMap<String, Vec<Row>>;
