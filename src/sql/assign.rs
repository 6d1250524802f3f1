//! Column assignments for the write path.
//!
//! An `AssignmentSet` folds a request's optional update fields into ordered
//! `column = value` pairs. Absent fields are never included. A nullable text
//! field explicitly set to an empty value is normalized to a true NULL, so
//! "clear this field" and "set it to empty" are the same operation.
//! `updated_at` is appended to every set at build-completion time; a set
//! containing nothing but `updated_at` must be rejected as `NoFieldsToUpdate`
//! before any write is attempted.

use crate::error::{InventoryError, InventoryResult};
use crate::sql::{Dialect, SqlArg};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct AssignmentSet {
    columns: Vec<&'static str>,
    args: Vec<SqlArg>,
}

impl AssignmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a value to a column.
    pub fn set(&mut self, column: &'static str, arg: impl Into<SqlArg>) -> &mut Self {
        self.columns.push(column);
        self.args.push(arg.into());
        self
    }

    /// Assign a nullable text column, normalizing blank input to NULL.
    pub fn set_text(&mut self, column: &'static str, value: String) -> &mut Self {
        let arg = if value.trim().is_empty() {
            SqlArg::Null
        } else {
            SqlArg::String(value)
        };
        self.set(column, arg)
    }

    /// Clear a column to NULL.
    pub fn clear(&mut self, column: &'static str) -> &mut Self {
        self.set(column, SqlArg::Null)
    }

    /// True when no real field has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of assigned columns, for logging.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Names of the assigned columns, for response text.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Bind values in assignment order.
    pub fn args(&self) -> &[SqlArg] {
        &self.args
    }

    /// Finish the set: reject an empty set, then stamp `updated_at`.
    ///
    /// The check runs before stamping so a request that supplied no real field
    /// never reaches the store.
    pub fn finish(mut self, now: DateTime<Utc>) -> InventoryResult<Self> {
        if self.is_empty() {
            return Err(InventoryError::NoFieldsToUpdate);
        }
        self.set("updated_at", SqlArg::Timestamp(now));
        Ok(self)
    }

    /// Render the `SET` body (without the keyword), numbering placeholders
    /// from `next_param`.
    pub fn sql(&self, dialect: Dialect, next_param: &mut usize) -> String {
        self.columns
            .iter()
            .map(|column| format!("{} = {}", column, dialect.placeholder(next_param)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
