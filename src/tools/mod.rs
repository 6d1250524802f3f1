//! MCP tool implementations.
//!
//! This module contains the inventory tool handlers:
//! - `get_vehicles`: Filtered read over visible listings
//! - `update_vehicles`: Single-row or batch field updates
//! - `delete_vehicle`: Permanent row removal
//! - `add_notes`: Set or clear the notes field
//! - `delete_ai_video`: Clear the AI video field with best-effort storage cleanup

pub mod add_notes;
pub mod delete_ai_video;
pub mod delete_vehicle;
pub mod format;
pub mod get_vehicles;
pub mod update_vehicles;

pub use add_notes::{AddNotesHandler, AddNotesInput};
pub use delete_ai_video::{DeleteAiVideoHandler, DeleteAiVideoInput};
pub use delete_vehicle::{DeleteVehicleHandler, DeleteVehicleInput};
pub use get_vehicles::{GetVehiclesHandler, GetVehiclesInput};
pub use update_vehicles::{UpdateVehiclesHandler, UpdateVehiclesInput};
