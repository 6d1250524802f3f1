//! Query-shape building for the vehicles table.
//!
//! This module holds the generalizable part of the tool layer: resolving which
//! identification strategy a request supplied, and folding sparse optional
//! fields into ordered column predicates (read path) or column assignments
//! (write path). Everything here is pure and independent of the store client,
//! so the mutual-exclusion and precedence rules are testable in isolation.

pub mod arg;
pub mod assign;
pub mod ident;
pub mod predicate;

pub use arg::SqlArg;
pub use assign::AssignmentSet;
pub use ident::{Identifier, IdentifierCandidates};
pub use predicate::PredicateSet;

/// Placeholder syntax of the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Numbered placeholders: `$1`, `$2`, ...
    Postgres,
    /// Positional placeholders: `?`
    Sqlite,
}

impl Dialect {
    /// Render the next placeholder and advance the counter.
    pub fn placeholder(self, next: &mut usize) -> String {
        let n = *next;
        *next += 1;
        match self {
            Self::Postgres => format!("${}", n),
            Self::Sqlite => "?".to_string(),
        }
    }
}
