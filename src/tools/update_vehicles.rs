//! Vehicle update tool.
//!
//! Targets either a single row through an identifier (id wins over vin wins
//! over stock_number; descriptive filters are then ignored) or a batch through
//! the make/model filter group. With neither, the operation is rejected: it
//! must never default to all rows. The target set is captured as row ids at
//! lookup time and the update is applied to those ids, not to a re-evaluated
//! filter.

use crate::db::{Store, VehicleStore, Visibility};
use crate::error::{InventoryError, InventoryResult};
use crate::models::VehicleRef;
use crate::sql::{AssignmentSet, Identifier, IdentifierCandidates, PredicateSet};
use crate::tools::format::plural_s;
use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the update_vehicles tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UpdateVehiclesInput {
    /// Target a single vehicle by store id (highest priority)
    pub id: Option<i64>,
    /// Target a single vehicle by VIN (used when id is absent)
    pub vin: Option<String>,
    /// Target a single vehicle by stock number (used when id and vin are absent)
    pub stock_number: Option<String>,
    /// Batch filter: substring match on make (used only when no identifier is given)
    pub make: Option<String>,
    /// Batch filter: substring match on model (used only when no identifier is given)
    pub model: Option<String>,

    /// New price
    pub price: Option<f64>,
    /// New custom price
    pub custom_price: Option<f64>,
    /// New exterior colour; empty string clears the field
    pub colour: Option<String>,
    /// New interior color; empty string clears the field
    pub interior_color: Option<String>,
    /// New description; empty string clears the field
    pub description: Option<String>,
    /// New AI description; empty string clears the field
    pub ai_description: Option<String>,
    /// New odometer reading
    pub odometer: Option<f64>,
    /// New new/used status; empty string clears the field
    pub new_used: Option<String>,
    /// New certified pre-owned flag
    pub certified: Option<bool>,
    /// New dealer name; empty string clears the field
    pub dealer_name: Option<String>,
    /// New tags; empty string clears the field
    pub tags: Option<String>,
    /// New inventory date; empty string clears the field
    pub inventory_date: Option<String>,
}

/// One entry per updatable field: fold the field into the assignment set when present.
type AssignRule = (&'static str, fn(&UpdateVehiclesInput, &mut AssignmentSet));

const ASSIGN_RULES: &[AssignRule] = &[
    ("price", |i, a| {
        if let Some(v) = i.price {
            a.set("price", v);
        }
    }),
    ("custom_price", |i, a| {
        if let Some(v) = i.custom_price {
            a.set("custom_price", v);
        }
    }),
    ("colour", |i, a| {
        if let Some(v) = &i.colour {
            a.set_text("colour", v.clone());
        }
    }),
    ("interior_color", |i, a| {
        if let Some(v) = &i.interior_color {
            a.set_text("interior_color", v.clone());
        }
    }),
    ("description", |i, a| {
        if let Some(v) = &i.description {
            a.set_text("description", v.clone());
        }
    }),
    ("ai_description", |i, a| {
        if let Some(v) = &i.ai_description {
            a.set_text("ai_description", v.clone());
        }
    }),
    ("odometer", |i, a| {
        if let Some(v) = i.odometer {
            a.set("odometer", v);
        }
    }),
    ("new_used", |i, a| {
        if let Some(v) = &i.new_used {
            a.set_text("new_used", v.clone());
        }
    }),
    ("certified", |i, a| {
        if let Some(v) = i.certified {
            a.set("certified", v);
        }
    }),
    ("dealer_name", |i, a| {
        if let Some(v) = &i.dealer_name {
            a.set_text("dealer_name", v.clone());
        }
    }),
    ("tags", |i, a| {
        if let Some(v) = &i.tags {
            a.set_text("tags", v.clone());
        }
    }),
    ("inventory_date", |i, a| {
        if let Some(v) = &i.inventory_date {
            a.set_text("inventory_date", v.clone());
        }
    }),
];

/// Build the assignment set from the present update fields.
pub fn build_assignments(input: &UpdateVehiclesInput) -> AssignmentSet {
    let mut assignments = AssignmentSet::new();
    for (_, rule) in ASSIGN_RULES {
        rule(input, &mut assignments);
    }
    assignments
}

/// How the target rows were chosen, for response text.
enum Target {
    Single(Identifier),
    Batch { description: String },
}

pub struct UpdateVehiclesHandler {
    vehicles: VehicleStore,
}

impl UpdateVehiclesHandler {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            vehicles: VehicleStore::new(store),
        }
    }

    pub async fn update_vehicles(&self, input: UpdateVehiclesInput) -> InventoryResult<String> {
        // Validation first: a request with no real field never reaches the store.
        let assignments = build_assignments(&input).finish(Utc::now())?;

        let candidates = IdentifierCandidates::new(
            input.id,
            input.vin.clone(),
            input.stock_number.clone(),
        );

        let (target, ids) = match candidates.resolve_priority() {
            Some(ident) => {
                let Some(row) = self
                    .vehicles
                    .lookup_one(&ident, Visibility::VisibleOnly)
                    .await?
                else {
                    return Ok(format!(
                        "No visible vehicle matched {}. Nothing was updated.",
                        ident.describe()
                    ));
                };
                (Target::Single(ident), vec![row.id])
            }
            None => {
                let (filter, description) = batch_filter(&input)?;
                let rows = self.vehicles.lookup_refs(&filter).await?;
                if rows.is_empty() {
                    return Ok(format!(
                        "No visible vehicles matched {}. Nothing was updated.",
                        description
                    ));
                }
                let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
                (Target::Batch { description }, ids)
            }
        };

        let updated = self.vehicles.update_by_ids(&ids, &assignments).await?;

        info!(
            rows = updated.len(),
            columns = assignments.len(),
            "update_vehicles completed"
        );
        Ok(render(&target, &updated, &assignments))
    }
}

/// Build the batch-targeting filter; no identifier and no filter is an error.
fn batch_filter(input: &UpdateVehiclesInput) -> InventoryResult<(PredicateSet, String)> {
    let mut filter = PredicateSet::new();
    filter.visible_only();
    let mut described = Vec::new();

    if let Some(make) = &input.make {
        filter.contains("make", make);
        described.push(format!("make '{}'", make));
    }
    if let Some(model) = &input.model {
        filter.contains("model", model);
        described.push(format!("model '{}'", model));
    }

    if described.is_empty() {
        return Err(InventoryError::NoTargetCriteria);
    }
    Ok((filter, described.join(" and ")))
}

fn render(target: &Target, updated: &[VehicleRef], assignments: &AssignmentSet) -> String {
    let columns: Vec<&str> = assignments
        .columns()
        .iter()
        .filter(|c| **c != "updated_at")
        .copied()
        .collect();

    let mut out = match target {
        Target::Single(ident) => format!(
            "Updated 1 vehicle matched by {} (fields: {}):\n",
            ident.describe(),
            columns.join(", ")
        ),
        Target::Batch { description } => format!(
            "Updated {} vehicle{} matched by {} (fields: {}):\n",
            updated.len(),
            plural_s(updated.len()),
            description,
            columns.join(", ")
        ),
    };
    for (i, row) in updated.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, row.identity()));
    }
    out.trim_end().to_string()
}
