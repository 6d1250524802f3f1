//! AI video removal tool.
//!
//! Clears the `ai_video` field on a single visible vehicle, then attempts a
//! best-effort delete of the storage artifact at the derived key. The two
//! results are combined into one report; the storage outcome never gates the
//! field update. A row with no recorded video short-circuits without touching
//! either the store or the bucket.

use crate::db::{Store, VehicleStore, Visibility};
use crate::error::{InventoryError, InventoryResult};
use crate::sql::{AssignmentSet, IdentifierCandidates};
use crate::storage::{CleanupOutcome, ObjectStorage};
use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the delete_ai_video tool. Exactly one identifier must be given.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DeleteAiVideoInput {
    /// Store id of the vehicle
    pub id: Option<i64>,
    /// VIN of the vehicle
    pub vin: Option<String>,
    /// Stock number of the vehicle
    pub stock_number: Option<String>,
}

pub struct DeleteAiVideoHandler {
    vehicles: VehicleStore,
    storage: Arc<ObjectStorage>,
}

impl DeleteAiVideoHandler {
    pub fn new(store: Arc<Store>, storage: Arc<ObjectStorage>) -> Self {
        Self {
            vehicles: VehicleStore::new(store),
            storage,
        }
    }

    pub async fn delete_ai_video(&self, input: DeleteAiVideoInput) -> InventoryResult<String> {
        let ident = IdentifierCandidates::new(input.id, input.vin, input.stock_number)
            .resolve_exclusive("id, vin, stock_number")?;

        let Some(row) = self
            .vehicles
            .lookup_one(&ident, Visibility::VisibleOnly)
            .await?
        else {
            return Ok(format!(
                "No visible vehicle matched {}. Nothing was deleted.",
                ident.describe()
            ));
        };

        // Already clear: neither the bucket nor the row is touched.
        if row.ai_video.is_none() {
            return Ok(format!(
                "Vehicle {} has no AI video recorded; nothing to delete.",
                row.identity()
            ));
        }

        // The storage key is derived from the stock number; without one the
        // artifact cannot be located and clearing the flag would orphan it
        // with no way back.
        let Some(stock_number) = row.stock_number.clone() else {
            return Err(InventoryError::internal(format!(
                "vehicle {} has an AI video recorded but no stock number, so the storage key \
                 cannot be derived; neither the object nor the field was touched",
                row.identity()
            )));
        };

        let mut assignments = AssignmentSet::new();
        assignments.clear("ai_video");
        let assignments = assignments.finish(Utc::now())?;
        self.vehicles.update_by_ids(&[row.id], &assignments).await?;

        let key = ObjectStorage::ai_video_key(&stock_number);
        let outcome = self.storage.delete_object(&key).await;

        info!(id = row.id, key = %key, outcome = ?outcome, "delete_ai_video completed");
        Ok(render(&row.identity(), &key, &outcome))
    }
}

fn render(identity: &str, key: &str, outcome: &CleanupOutcome) -> String {
    let base = format!("Cleared the AI video for vehicle {}.", identity);
    match outcome {
        CleanupOutcome::Deleted => {
            format!("{} Storage object '{}' was deleted.", base, key)
        }
        CleanupOutcome::Skipped => format!(
            "{} Storage cleanup was skipped (object storage is not configured); the object at \
             '{}' may still exist.",
            base, key
        ),
        CleanupOutcome::Failed(message) => format!(
            "{} Warning: {}. The database field was cleared anyway, so a new video can be \
             generated; the orphaned object can be removed later.",
            base,
            InventoryError::object_cleanup(key, message.clone())
        ),
    }
}
