//! MCP service implementation using rmcp.
//!
//! This module defines the InventoryService struct with the vehicle inventory
//! tools exposed via the MCP protocol using the rmcp framework's macros.
//! Every tool returns a single text string; failures of any kind are folded
//! into an `Error: ...` message rather than surfaced as protocol errors, so a
//! tool call has exactly one terminal outcome.

use crate::db::Store;
use crate::error::InventoryError;
use crate::storage::ObjectStorage;
use crate::tools::{
    AddNotesHandler, AddNotesInput, DeleteAiVideoHandler, DeleteAiVideoInput,
    DeleteVehicleHandler, DeleteVehicleInput, GetVehiclesHandler, GetVehiclesInput,
    UpdateVehiclesHandler, UpdateVehiclesInput,
};
use rmcp::{
    ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct InventoryService {
    /// Shared store connection for all vehicle operations
    store: Arc<Store>,
    /// Shared object storage client for AI video cleanup
    storage: Arc<ObjectStorage>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl InventoryService {
    /// Create a new InventoryService instance.
    pub fn new(store: Arc<Store>, storage: Arc<ObjectStorage>) -> Self {
        Self {
            store,
            storage,
            tool_router: Self::tool_router(),
        }
    }
}

/// Convert a tool result into the single text response every tool returns.
fn respond(result: Result<String, InventoryError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            if e.is_validation() {
                debug!(error = %e, "Tool call rejected by validation");
            } else {
                warn!(error = %e, "Tool call failed");
            }
            format!("Error: {}", e)
        }
    }
}

#[tool_router]
impl InventoryService {
    #[tool(
        description = "Search the vehicle inventory.\nAll filters are optional and combined with AND. Text filters match case-insensitive substrings (make=\"ferrari\" matches \"Ferrari\").\nSoft-deleted vehicles never appear.\nSort with sort_by (updated_at, created_at, year, price, odometer) and sort_order (asc/desc); cap results with limit."
    )]
    async fn get_vehicles(&self, Parameters(input): Parameters<GetVehiclesInput>) -> String {
        let handler = GetVehiclesHandler::new(self.store.clone());
        respond(handler.get_vehicles(input).await)
    }

    #[tool(
        description = "Update fields on one vehicle or a batch.\nTarget one vehicle with id, vin, or stock_number (id wins over vin wins over stock_number), or a batch with make/model filters.\nOnly the fields you pass are changed; pass an empty string to clear a text field.\nNote: a make/model batch has no row cap - check with get_vehicles first."
    )]
    async fn update_vehicles(&self, Parameters(input): Parameters<UpdateVehiclesInput>) -> String {
        let handler = UpdateVehiclesHandler::new(self.store.clone());
        respond(handler.update_vehicles(input).await)
    }

    #[tool(
        description = "Permanently delete a vehicle row.\nIdentify it with exactly one of vin or stock_number.\nThis is a hard delete and also removes soft-deleted rows; the upstream inventory sync may re-add the vehicle on its next run."
    )]
    async fn delete_vehicle(&self, Parameters(input): Parameters<DeleteVehicleInput>) -> String {
        let handler = DeleteVehicleHandler::new(self.store.clone());
        respond(handler.delete_vehicle(input).await)
    }

    #[tool(
        description = "Set or delete the notes on a vehicle.\nIdentify it with exactly one of id, vin, or stock_number.\nOmit notes (or pass an empty string) to delete the existing notes."
    )]
    async fn add_notes(&self, Parameters(input): Parameters<AddNotesInput>) -> String {
        let handler = AddNotesHandler::new(self.store.clone());
        respond(handler.add_notes(input).await)
    }

    #[tool(
        description = "Remove a vehicle's AI video.\nIdentify the vehicle with exactly one of id, vin, or stock_number.\nClears the ai_video field and then tries to delete the storage object; a storage failure is reported as a warning but never blocks the field update."
    )]
    async fn delete_ai_video(&self, Parameters(input): Parameters<DeleteAiVideoInput>) -> String {
        let handler = DeleteAiVideoHandler::new(self.store.clone(), self.storage.clone());
        respond(handler.delete_ai_video(input).await)
    }
}

#[tool_handler]
impl ServerHandler for InventoryService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "vehicle-mcp-server".to_owned(),
                title: Some("Vehicle Inventory MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tools for managing a dealership vehicle inventory.\n\
                \n\
                ## Workflow\n\
                1. Use `get_vehicles` to find listings; text filters are case-insensitive substring matches\n\
                2. Mutate with `update_vehicles`, `add_notes`, `delete_ai_video`, or `delete_vehicle`\n\
                3. Single-row tools need exactly one identifier (id / vin / stock_number); sending two is rejected\n\
                \n\
                ## Soft deletes\n\
                Vehicles marked as deleted are invisible to every tool except `delete_vehicle`,\n\
                which permanently removes rows in any state.\n\
                \n\
                ## Upstream sync\n\
                The inventory is repopulated from the source system roughly every two hours.\n\
                Hard-deleted vehicles may reappear after the next sync.\n\
                \n\
                ## Batch updates\n\
                `update_vehicles` with make/model filters (and no identifier) updates every\n\
                matching vehicle, with no row cap. Check the match set with `get_vehicles` first."
                    .to_string(),
            ),
        }
    }
}
