//! Filtered vehicle read tool.
//!
//! Translates a sparse set of optional filter fields into column predicates
//! over visible rows. The field-to-predicate mapping is a static table folded
//! over the input, so the translation rules stay auditable in one place
//! instead of being scattered through conditionals.

use crate::db::{Store, VehicleStore};
use crate::error::InventoryResult;
use crate::models::{DEFAULT_RESULT_LIMIT, MAX_RESULT_LIMIT, SortKey, SortOrder, Vehicle};
use crate::sql::PredicateSet;
use crate::tools::format::{plural_s, vehicle_line};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the get_vehicles tool. Every field is optional; absent fields
/// add no predicate. String filters are case-insensitive substring matches.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GetVehiclesInput {
    /// Substring match on make, e.g. "ferrari" matches "Ferrari"
    pub make: Option<String>,
    /// Substring match on model
    pub model: Option<String>,
    /// Exact model year; may be combined with min_year/max_year
    pub year: Option<i64>,
    /// Minimum model year (inclusive)
    pub min_year: Option<i64>,
    /// Maximum model year (inclusive)
    pub max_year: Option<i64>,
    /// Minimum price (inclusive)
    pub min_price: Option<f64>,
    /// Maximum price (inclusive)
    pub max_price: Option<f64>,
    /// true: only vehicles with a price; false: only vehicles without one
    pub has_price: Option<bool>,
    /// Substring match on exterior colour
    pub colour: Option<String>,
    /// Substring match on interior color
    pub interior_color: Option<String>,
    /// Substring match on new/used status
    pub new_used: Option<String>,
    /// Exact match on certified pre-owned flag
    pub certified: Option<bool>,
    /// Substring match on transmission
    pub transmission: Option<String>,
    /// Substring match on drivetrain
    pub drivetrain: Option<String>,
    /// Substring match on fuel type
    pub fuel: Option<String>,
    /// Maximum odometer reading (inclusive)
    pub max_odometer: Option<f64>,
    /// Substring match on body type
    pub body: Option<String>,
    /// Substring match on dealer name
    pub dealer_name: Option<String>,
    /// Sort key: updated_at (default), created_at, year, price, odometer
    pub sort_by: Option<SortKey>,
    /// Sort direction: asc or desc (default)
    pub sort_order: Option<SortOrder>,
    /// Maximum rows returned. Default: 50, max: 200
    pub limit: Option<u32>,
}

/// One entry per filter field: fold the field into the predicate set when present.
type FilterRule = (&'static str, fn(&GetVehiclesInput, &mut PredicateSet));

const FILTER_RULES: &[FilterRule] = &[
    ("make", |i, p| {
        if let Some(v) = &i.make {
            p.contains("make", v);
        }
    }),
    ("model", |i, p| {
        if let Some(v) = &i.model {
            p.contains("model", v);
        }
    }),
    ("year", |i, p| {
        if let Some(v) = i.year {
            p.eq("year", v);
        }
    }),
    ("min_year", |i, p| {
        if let Some(v) = i.min_year {
            p.ge("year", v);
        }
    }),
    ("max_year", |i, p| {
        if let Some(v) = i.max_year {
            p.le("year", v);
        }
    }),
    ("min_price", |i, p| {
        if let Some(v) = i.min_price {
            p.ge("price", v);
        }
    }),
    ("max_price", |i, p| {
        if let Some(v) = i.max_price {
            p.le("price", v);
        }
    }),
    ("has_price", |i, p| {
        if let Some(v) = i.has_price {
            p.has_value("price", v);
        }
    }),
    ("colour", |i, p| {
        if let Some(v) = &i.colour {
            p.contains("colour", v);
        }
    }),
    ("interior_color", |i, p| {
        if let Some(v) = &i.interior_color {
            p.contains("interior_color", v);
        }
    }),
    ("new_used", |i, p| {
        if let Some(v) = &i.new_used {
            p.contains("new_used", v);
        }
    }),
    ("certified", |i, p| {
        if let Some(v) = i.certified {
            p.eq("certified", v);
        }
    }),
    ("transmission", |i, p| {
        if let Some(v) = &i.transmission {
            p.contains("transmission", v);
        }
    }),
    ("drivetrain", |i, p| {
        if let Some(v) = &i.drivetrain {
            p.contains("drivetrain", v);
        }
    }),
    ("fuel", |i, p| {
        if let Some(v) = &i.fuel {
            p.contains("fuel_type", v);
        }
    }),
    ("max_odometer", |i, p| {
        if let Some(v) = i.max_odometer {
            p.le("odometer", v);
        }
    }),
    ("body", |i, p| {
        if let Some(v) = &i.body {
            p.contains("body_type", v);
        }
    }),
    ("dealer_name", |i, p| {
        if let Some(v) = &i.dealer_name {
            p.contains("dealer_name", v);
        }
    }),
];

/// Build the visible-rows predicate set for a request.
pub fn build_filter(input: &GetVehiclesInput) -> PredicateSet {
    let mut predicates = PredicateSet::new();
    predicates.visible_only();
    for (_, rule) in FILTER_RULES {
        rule(input, &mut predicates);
    }
    predicates
}

pub struct GetVehiclesHandler {
    vehicles: VehicleStore,
}

impl GetVehiclesHandler {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            vehicles: VehicleStore::new(store),
        }
    }

    pub async fn get_vehicles(&self, input: GetVehiclesInput) -> InventoryResult<String> {
        let filter = build_filter(&input);
        let sort = input.sort_by.unwrap_or_default();
        let order = input.sort_order.unwrap_or_default();
        let limit = input
            .limit
            .map(|l| l.clamp(1, MAX_RESULT_LIMIT))
            .unwrap_or(DEFAULT_RESULT_LIMIT);

        let rows = self.vehicles.find(&filter, sort, order, limit).await?;

        info!(
            predicates = filter.len(),
            rows = rows.len(),
            sort = sort.column(),
            "get_vehicles completed"
        );
        Ok(render(&rows, limit))
    }
}

fn render(rows: &[Vehicle], limit: u32) -> String {
    if rows.is_empty() {
        return "No vehicles matched the given filters.".to_string();
    }

    let mut out = format!("Found {} vehicle{}:\n", rows.len(), plural_s(rows.len()));
    for (i, v) in rows.iter().enumerate() {
        out.push_str(&vehicle_line(i + 1, v));
        out.push('\n');
    }
    if rows.len() as u32 == limit {
        out.push_str(&format!(
            "Showing the first {} matches; narrow the filters or raise the limit to see more.\n",
            limit
        ));
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::Dialect;

    #[test]
    fn test_no_filters_only_visibility() {
        let filter = build_filter(&GetVehiclesInput::default());
        let mut n = 1;
        assert_eq!(filter.sql(Dialect::Postgres, &mut n), "deleted_at IS NULL");
    }

    #[test]
    fn test_exact_and_range_year_filters_combine() {
        let input = GetVehiclesInput {
            year: Some(2020),
            min_year: Some(2018),
            max_year: Some(2022),
            ..Default::default()
        };
        let filter = build_filter(&input);
        let mut n = 1;
        let sql = filter.sql(Dialect::Postgres, &mut n);
        assert!(sql.contains("year = $1"));
        assert!(sql.contains("year >= $2"));
        assert!(sql.contains("year <= $3"));
    }

    #[test]
    fn test_has_price_false_maps_to_is_null() {
        let input = GetVehiclesInput {
            has_price: Some(false),
            ..Default::default()
        };
        let filter = build_filter(&input);
        let mut n = 1;
        assert!(
            filter
                .sql(Dialect::Sqlite, &mut n)
                .contains("price IS NULL")
        );
    }

    #[test]
    fn test_input_deserializes_with_unknown_absent_fields() {
        let input: GetVehiclesInput =
            serde_json::from_str(r#"{"make": "ferrari", "limit": 5}"#).unwrap();
        assert_eq!(input.make.as_deref(), Some("ferrari"));
        assert_eq!(input.limit, Some(5));
        assert!(input.model.is_none());
    }
}
