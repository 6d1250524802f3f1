//! Store access layer.
//!
//! This module provides access to the vehicles table:
//! - Connection pool management for the hosted store (Postgres) and local
//!   SQLite (development and tests)
//! - Parameter binding and statement execution per backend
//! - Row lookup and mutate-by-id execution with the soft-delete visibility rule

pub mod executor;
pub mod pool;
pub mod vehicles;

pub use pool::{Store, StorePool};
pub use vehicles::{VehicleStore, Visibility};
