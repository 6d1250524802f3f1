//! Identifier resolution for single-row operations.
//!
//! A request may carry any subset of the identifying fields. Tools that target
//! exactly one row must receive exactly one of them: zero is `NoIdentifier`,
//! two or more is `AmbiguousIdentifier` even when both values could agree on
//! the same row. The batch-capable update tool instead resolves by fixed
//! priority (id, then vin, then stock number) and falls through to its
//! descriptive filters when none is present.

use crate::error::{InventoryError, InventoryResult};
use crate::sql::SqlArg;

/// A resolved identification strategy: one field, one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    Id(i64),
    Vin(String),
    StockNumber(String),
}

impl Identifier {
    /// Column the identifier matches against.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Vin(_) => "vin",
            Self::StockNumber(_) => "stock_number",
        }
    }

    /// Bind value for the identifier.
    pub fn arg(&self) -> SqlArg {
        match self {
            Self::Id(v) => SqlArg::Int(*v),
            Self::Vin(v) => SqlArg::String(v.clone()),
            Self::StockNumber(v) => SqlArg::String(v.clone()),
        }
    }

    /// Human-readable `field = value` form for response text.
    pub fn describe(&self) -> String {
        match self {
            Self::Id(v) => format!("id {}", v),
            Self::Vin(v) => format!("VIN '{}'", v),
            Self::StockNumber(v) => format!("stock number '{}'", v),
        }
    }
}

/// The optional identifier fields a request supplied.
///
/// Blank strings are treated as absent; a caller sending `vin: "  "` has not
/// identified anything.
#[derive(Debug, Clone, Default)]
pub struct IdentifierCandidates {
    pub id: Option<i64>,
    pub vin: Option<String>,
    pub stock_number: Option<String>,
}

impl IdentifierCandidates {
    pub fn new(id: Option<i64>, vin: Option<String>, stock_number: Option<String>) -> Self {
        Self {
            id,
            vin: normalize(vin),
            stock_number: normalize(stock_number),
        }
    }

    /// List of the candidate fields that were actually supplied.
    fn supplied(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.id.is_some() {
            fields.push("id");
        }
        if self.vin.is_some() {
            fields.push("vin");
        }
        if self.stock_number.is_some() {
            fields.push("stock_number");
        }
        fields
    }

    /// Resolve under mutual exclusion: exactly one candidate must be present.
    ///
    /// `expected` names the fields this tool accepts, for the error message.
    pub fn resolve_exclusive(self, expected: &str) -> InventoryResult<Identifier> {
        let supplied = self.supplied();
        if supplied.len() > 1 {
            return Err(InventoryError::ambiguous_identifier(&supplied));
        }
        self.first_by_priority()
            .ok_or_else(|| InventoryError::no_identifier(expected))
    }

    /// Resolve by priority: id wins over vin wins over stock number, extra
    /// candidates are ignored. Returns `None` when nothing was supplied so the
    /// caller can fall back to descriptive filters.
    pub fn resolve_priority(self) -> Option<Identifier> {
        self.first_by_priority()
    }

    fn first_by_priority(self) -> Option<Identifier> {
        if let Some(id) = self.id {
            return Some(Identifier::Id(id));
        }
        if let Some(vin) = self.vin {
            return Some(Identifier::Vin(vin));
        }
        self.stock_number.map(Identifier::StockNumber)
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
