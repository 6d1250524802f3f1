//! Vehicle Inventory MCP Server Library
//!
//! This library provides MCP (Model Context Protocol) tools for AI assistants
//! to search and manage a dealership vehicle inventory backed by a relational
//! store, with best-effort object storage cleanup for AI video artifacts.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod sql;
pub mod storage;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::InventoryError;
pub use mcp::InventoryService;
