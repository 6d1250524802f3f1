//! Bind values for built queries.

use chrono::{DateTime, Utc};

/// A value bound to a query placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    /// NULL value (used when clearing a nullable column)
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (stored as i64 for maximum range)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Timestamp value (updated_at stamping)
    Timestamp(DateTime<Utc>),
}

impl SqlArg {
    /// Check if this argument is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type name of this argument for debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl From<&str> for SqlArg {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for SqlArg {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for SqlArg {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for SqlArg {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for SqlArg {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}
