//! Notes update tool.
//!
//! Sets or clears the free-text `notes` field on a single visible vehicle.
//! Absent or blank notes mean "clear": clearing and setting-to-empty are the
//! same operation and both store a true NULL. The response reports the
//! previous value so callers can see what was replaced.

use crate::db::{Store, VehicleStore, Visibility};
use crate::error::InventoryResult;
use crate::sql::{AssignmentSet, IdentifierCandidates};
use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the add_notes tool. Exactly one identifier must be given.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AddNotesInput {
    /// Store id of the vehicle
    pub id: Option<i64>,
    /// VIN of the vehicle
    pub vin: Option<String>,
    /// Stock number of the vehicle
    pub stock_number: Option<String>,
    /// Notes text. Omit or pass an empty string to delete the existing notes.
    pub notes: Option<String>,
}

pub struct AddNotesHandler {
    vehicles: VehicleStore,
}

impl AddNotesHandler {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            vehicles: VehicleStore::new(store),
        }
    }

    pub async fn add_notes(&self, input: AddNotesInput) -> InventoryResult<String> {
        let ident = IdentifierCandidates::new(input.id, input.vin, input.stock_number)
            .resolve_exclusive("id, vin, stock_number")?;

        let Some(row) = self
            .vehicles
            .lookup_one(&ident, Visibility::VisibleOnly)
            .await?
        else {
            return Ok(format!(
                "No visible vehicle matched {}. Notes were not changed.",
                ident.describe()
            ));
        };

        let previous = row.notes.clone();
        let clearing = input
            .notes
            .as_deref()
            .map(|n| n.trim().is_empty())
            .unwrap_or(true);

        let mut assignments = AssignmentSet::new();
        match &input.notes {
            Some(notes) if !clearing => {
                assignments.set_text("notes", notes.clone());
            }
            _ => {
                assignments.clear("notes");
            }
        }
        let assignments = assignments.finish(Utc::now())?;

        let updated = self.vehicles.update_by_ids(&[row.id], &assignments).await?;
        let identity = updated
            .first()
            .map(|r| r.identity())
            .unwrap_or_else(|| row.identity());

        info!(id = row.id, clearing = clearing, "add_notes completed");
        Ok(render(&identity, clearing, previous.as_deref(), input.notes.as_deref()))
    }
}

fn render(identity: &str, clearing: bool, previous: Option<&str>, new: Option<&str>) -> String {
    if clearing {
        match previous {
            Some(old) => format!(
                "Deleted notes for vehicle {}. Previous notes: \"{}\"",
                identity, old
            ),
            None => format!(
                "Deleted notes for vehicle {} (there were no notes to begin with).",
                identity
            ),
        }
    } else {
        let new = new.unwrap_or_default();
        match previous {
            Some(old) => format!(
                "Updated notes for vehicle {}. Previous: \"{}\". New: \"{}\"",
                identity, old, new
            ),
            None => format!("Added notes for vehicle {}: \"{}\"", identity, new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_clearing_reports_deleted() {
        let text = render("VIN X", true, Some("old note"), None);
        assert!(text.contains("Deleted notes"));
        assert!(text.contains("old note"));
    }

    #[test]
    fn test_render_setting_reports_before_and_after() {
        let text = render("VIN X", false, Some("old"), Some("new"));
        assert!(text.contains("Previous: \"old\""));
        assert!(text.contains("New: \"new\""));
    }

    #[test]
    fn test_render_first_add() {
        let text = render("stock S1", false, None, Some("fresh"));
        assert!(text.starts_with("Added notes"));
    }
}
