//! Error types for the Vehicle Inventory MCP Server.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Every tool converts these into the `Error: ...` text it returns
//! to the caller; nothing here escalates to a process-level failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("No identifier provided. Supply exactly one of: {expected}.")]
    NoIdentifier { expected: String },

    #[error(
        "Ambiguous identification: {supplied} were all provided. Supply exactly one identifier so the target row is unambiguous."
    )]
    AmbiguousIdentifier { supplied: String },

    #[error("No fields to update. Provide at least one field with a new value.")]
    NoFieldsToUpdate,

    #[error(
        "No target criteria. Provide an identifier (id, vin, stock_number) or a descriptive filter (make, model); updating all rows is not allowed."
    )]
    NoTargetCriteria,

    #[error(
        "Multiple rows matched {field} = '{value}' ({count} rows). The value is expected to be unique; aborting without changing anything."
    )]
    MultipleMatches {
        field: String,
        value: String,
        count: usize,
    },

    #[error("Store read failed: {message}")]
    StoreReadFailed { message: String },

    #[error("Store write failed: {message}")]
    StoreWriteFailed { message: String },

    #[error("Object cleanup failed for '{key}': {message}")]
    ObjectCleanupFailed { key: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl InventoryError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a no-identifier validation error listing the accepted fields.
    pub fn no_identifier(expected: impl Into<String>) -> Self {
        Self::NoIdentifier {
            expected: expected.into(),
        }
    }

    /// Create an ambiguous-identifier validation error from the supplied field names.
    pub fn ambiguous_identifier(supplied: &[&str]) -> Self {
        Self::AmbiguousIdentifier {
            supplied: supplied.join(", "),
        }
    }

    /// Create a multiple-matches integrity error.
    pub fn multiple_matches(
        field: impl Into<String>,
        value: impl Into<String>,
        count: usize,
    ) -> Self {
        Self::MultipleMatches {
            field: field.into(),
            value: value.into(),
            count,
        }
    }

    /// Wrap a store-level error from the read path.
    pub fn store_read(err: sqlx::Error) -> Self {
        Self::StoreReadFailed {
            message: store_message(err),
        }
    }

    /// Wrap a store-level error from the write path.
    pub fn store_write(err: sqlx::Error) -> Self {
        Self::StoreWriteFailed {
            message: store_message(err),
        }
    }

    /// Create an object cleanup error.
    pub fn object_cleanup(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ObjectCleanupFailed {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for errors caught before any store call is attempted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoIdentifier { .. }
                | Self::AmbiguousIdentifier { .. }
                | Self::NoFieldsToUpdate
                | Self::NoTargetCriteria
        )
    }
}

/// Extract the store's own message where sqlx carries one, so callers see
/// the database error verbatim.
fn store_message(err: sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().to_string(),
        sqlx::Error::PoolTimedOut => "connection pool acquire timed out".to_string(),
        sqlx::Error::PoolClosed => "connection pool is closed".to_string(),
        sqlx::Error::Io(io_err) => format!("I/O error: {}", io_err),
        other => other.to_string(),
    }
}

/// Result type alias for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_identifier_message_lists_expected_fields() {
        let err = InventoryError::no_identifier("vin, stock_number");
        assert!(err.to_string().contains("vin, stock_number"));
    }

    #[test]
    fn test_ambiguous_identifier_message_lists_supplied_fields() {
        let err = InventoryError::ambiguous_identifier(&["vin", "stock_number"]);
        let msg = err.to_string();
        assert!(msg.contains("vin, stock_number"));
        assert!(msg.contains("exactly one"));
    }

    #[test]
    fn test_multiple_matches_message() {
        let err = InventoryError::multiple_matches("vin", "WAUZZZ", 3);
        let msg = err.to_string();
        assert!(msg.contains("vin"));
        assert!(msg.contains("3 rows"));
        assert!(msg.contains("aborting"));
    }

    #[test]
    fn test_validation_classification() {
        assert!(InventoryError::NoFieldsToUpdate.is_validation());
        assert!(InventoryError::NoTargetCriteria.is_validation());
        assert!(InventoryError::no_identifier("id").is_validation());
        assert!(!InventoryError::multiple_matches("vin", "X", 2).is_validation());
        assert!(!InventoryError::configuration("missing url").is_validation());
    }

    #[test]
    fn test_store_message_passthrough() {
        let err = InventoryError::store_read(sqlx::Error::PoolClosed);
        assert!(err.to_string().contains("pool is closed"));
    }
}
