//! Column predicates for the read path.
//!
//! A `PredicateSet` is an ordered list of `(column, operator, value)` clauses
//! built by folding a request's optional filter fields. Absent fields are
//! never translated into a clause. String filters are case-insensitive
//! substring matches; `has_x` booleans map to nullness checks; numeric fields
//! support exact and `min`/`max` bounds, all ANDed together.

use crate::sql::{Dialect, SqlArg};

#[derive(Debug, Clone)]
enum Clause {
    /// `column IS NULL` / `column IS NOT NULL`, no bind value.
    Nullness { column: &'static str, is_null: bool },
    /// `column <op> <placeholder>`, one bind value.
    Compare { column: &'static str, op: &'static str },
    /// `LOWER(column) LIKE <placeholder>`, one bind value (pre-lowercased, wildcard-wrapped).
    Contains { column: &'static str },
    /// `column IN (<placeholders>)`, `count` bind values.
    InList { column: &'static str, count: usize },
    /// Raw fragment with no bind value (visibility rule).
    Raw(&'static str),
}

/// Ordered, ANDed set of column predicates.
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
    clauses: Vec<Clause>,
    args: Vec<SqlArg>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact comparison: `column = value`. Skipped by callers for absent fields.
    pub fn eq(&mut self, column: &'static str, arg: impl Into<SqlArg>) -> &mut Self {
        self.compare(column, "=", arg)
    }

    /// Lower bound: `column >= value`.
    pub fn ge(&mut self, column: &'static str, arg: impl Into<SqlArg>) -> &mut Self {
        self.compare(column, ">=", arg)
    }

    /// Upper bound: `column <= value`.
    pub fn le(&mut self, column: &'static str, arg: impl Into<SqlArg>) -> &mut Self {
        self.compare(column, "<=", arg)
    }

    fn compare(&mut self, column: &'static str, op: &'static str, arg: impl Into<SqlArg>) -> &mut Self {
        self.clauses.push(Clause::Compare { column, op });
        self.args.push(arg.into());
        self
    }

    /// Case-insensitive substring match. The value is lowercased and
    /// wildcard-wrapped here so callers get containment, not equality.
    pub fn contains(&mut self, column: &'static str, value: &str) -> &mut Self {
        self.clauses.push(Clause::Contains { column });
        self.args
            .push(SqlArg::String(format!("%{}%", value.to_lowercase())));
        self
    }

    /// Nullness check: `true` means `IS NOT NULL` ("has a value").
    pub fn has_value(&mut self, column: &'static str, has: bool) -> &mut Self {
        self.clauses.push(Clause::Nullness {
            column,
            is_null: !has,
        });
        self
    }

    /// Membership in an explicit id set (the mutate-by-captured-ids path).
    pub fn id_in(&mut self, ids: &[i64]) -> &mut Self {
        self.clauses.push(Clause::InList {
            column: "id",
            count: ids.len(),
        });
        self.args.extend(ids.iter().map(|id| SqlArg::Int(*id)));
        self
    }

    /// Soft-delete visibility rule: only rows not marked deleted.
    pub fn visible_only(&mut self) -> &mut Self {
        self.clauses.push(Clause::Raw("deleted_at IS NULL"));
        self
    }

    /// True when no clause has been added.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of clauses, for logging.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Bind values in clause order.
    pub fn args(&self) -> &[SqlArg] {
        &self.args
    }

    /// Render the `WHERE` body (without the keyword), numbering placeholders
    /// from `next_param`. Returns an empty string when no clause is present.
    pub fn sql(&self, dialect: Dialect, next_param: &mut usize) -> String {
        let mut parts = Vec::with_capacity(self.clauses.len());
        for clause in &self.clauses {
            match clause {
                Clause::Nullness { column, is_null } => {
                    if *is_null {
                        parts.push(format!("{} IS NULL", column));
                    } else {
                        parts.push(format!("{} IS NOT NULL", column));
                    }
                }
                Clause::Compare { column, op } => {
                    parts.push(format!(
                        "{} {} {}",
                        column,
                        op,
                        dialect.placeholder(next_param)
                    ));
                }
                Clause::Contains { column } => {
                    parts.push(format!(
                        "LOWER({}) LIKE {}",
                        column,
                        dialect.placeholder(next_param)
                    ));
                }
                Clause::InList { column, count } => {
                    let placeholders: Vec<String> = (0..*count)
                        .map(|_| dialect.placeholder(next_param))
                        .collect();
                    parts.push(format!("{} IN ({})", column, placeholders.join(", ")));
                }
                Clause::Raw(fragment) => parts.push(fragment.to_string()),
            }
        }
        parts.join(" AND ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_renders_nothing() {
        let set = PredicateSet::new();
        let mut n = 1;
        assert!(set.is_empty());
        assert_eq!(set.sql(Dialect::Postgres, &mut n), "");
        assert_eq!(n, 1);
    }

    #[test]
    fn test_contains_lowercases_and_wraps() {
        let mut set = PredicateSet::new();
        set.contains("make", "Ferrari");
        let mut n = 1;
        assert_eq!(set.sql(Dialect::Postgres, &mut n), "LOWER(make) LIKE $1");
        assert_eq!(set.args(), &[SqlArg::String("%ferrari%".to_string())]);
    }

    #[test]
    fn test_bounds_and_exact_are_anded() {
        let mut set = PredicateSet::new();
        set.eq("year", 2020i64)
            .ge("year", 2018i64)
            .le("year", 2022i64);
        let mut n = 1;
        assert_eq!(
            set.sql(Dialect::Postgres, &mut n),
            "year = $1 AND year >= $2 AND year <= $3"
        );
        assert_eq!(n, 4);
    }

    #[test]
    fn test_has_value_maps_to_nullness() {
        let mut set = PredicateSet::new();
        set.has_value("price", true).has_value("ai_video", false);
        let mut n = 1;
        assert_eq!(
            set.sql(Dialect::Sqlite, &mut n),
            "price IS NOT NULL AND ai_video IS NULL"
        );
        assert!(set.args().is_empty());
    }

    #[test]
    fn test_id_in_consumes_one_placeholder_per_id() {
        let mut set = PredicateSet::new();
        set.id_in(&[3, 5, 8]);
        let mut n = 1;
        assert_eq!(set.sql(Dialect::Postgres, &mut n), "id IN ($1, $2, $3)");
        assert_eq!(
            set.args(),
            &[SqlArg::Int(3), SqlArg::Int(5), SqlArg::Int(8)]
        );
    }

    #[test]
    fn test_visible_only_adds_raw_clause() {
        let mut set = PredicateSet::new();
        set.visible_only().eq("vin", "X");
        let mut n = 1;
        assert_eq!(
            set.sql(Dialect::Sqlite, &mut n),
            "deleted_at IS NULL AND vin = ?"
        );
    }

    #[test]
    fn test_placeholder_numbering_continues_from_start() {
        let mut set = PredicateSet::new();
        set.eq("vin", "X");
        // An UPDATE with two assignments would already have consumed $1/$2.
        let mut n = 3;
        assert_eq!(set.sql(Dialect::Postgres, &mut n), "vin = $3");
    }
}
