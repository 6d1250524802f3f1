//! Data models for the vehicle inventory.

pub mod vehicle;

pub use vehicle::{
    DEFAULT_RESULT_LIMIT, MAX_RESULT_LIMIT, SortKey, SortOrder, VEHICLE_COLUMNS,
    VEHICLE_REF_COLUMNS, Vehicle, VehicleRef,
};
