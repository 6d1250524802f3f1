//! Hard delete tool.
//!
//! The only operation that removes rows and the only one that looks past the
//! soft-delete flag: its job is to permanently remove a row whatever its
//! lifecycle state. The upstream inventory sync can re-add the vehicle on its
//! next run, which this layer cannot prevent, so the response says so.

use crate::db::{Store, VehicleStore, Visibility};
use crate::error::InventoryResult;
use crate::sql::IdentifierCandidates;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

const RESYNC_NOTE: &str = "Note: the upstream inventory sync runs roughly every two hours and may \
     re-add this vehicle if it is still present at the source.";

/// Input for the delete_vehicle tool. Exactly one identifier must be given.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DeleteVehicleInput {
    /// VIN of the vehicle to permanently delete
    pub vin: Option<String>,
    /// Stock number of the vehicle to permanently delete
    pub stock_number: Option<String>,
}

pub struct DeleteVehicleHandler {
    vehicles: VehicleStore,
}

impl DeleteVehicleHandler {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            vehicles: VehicleStore::new(store),
        }
    }

    pub async fn delete_vehicle(&self, input: DeleteVehicleInput) -> InventoryResult<String> {
        let ident = IdentifierCandidates::new(None, input.vin, input.stock_number)
            .resolve_exclusive("vin, stock_number")?;

        let Some(row) = self
            .vehicles
            .lookup_one(&ident, Visibility::IncludeDeleted)
            .await?
        else {
            return Ok(format!(
                "No vehicle matched {}. Nothing was deleted.",
                ident.describe()
            ));
        };

        let identity = row.identity();
        let deleted = self.vehicles.delete_by_ids(&[row.id]).await?;

        info!(id = row.id, rows = deleted, "delete_vehicle completed");
        Ok(format!(
            "Permanently deleted vehicle {} ({} row{}). {}",
            identity,
            deleted,
            if deleted == 1 { "" } else { "s" },
            RESYNC_NOTE
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_deserializes() {
        let input: DeleteVehicleInput =
            serde_json::from_str(r#"{"vin": "WP0AB2A99"}"#).unwrap();
        assert_eq!(input.vin.as_deref(), Some("WP0AB2A99"));
        assert!(input.stock_number.is_none());
    }
}
