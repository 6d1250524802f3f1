//! Shared fixtures for the tool integration tests.
//!
//! Tests run against an in-memory SQLite store with the same `vehicles`
//! schema the hosted store carries, exercised through the real tool handlers.

#![allow(dead_code)]

use std::sync::Arc;
use vehicle_mcp_server::db::{Store, executor};
use vehicle_mcp_server::models::{VEHICLE_COLUMNS, VEHICLE_REF_COLUMNS, Vehicle, VehicleRef};
use vehicle_mcp_server::sql::SqlArg;

pub const CREATE_VEHICLES_TABLE: &str = "CREATE TABLE vehicles (
        id INTEGER PRIMARY KEY,
        vin TEXT,
        stock_number TEXT,
        make TEXT,
        model TEXT,
        year INTEGER,
        series TEXT,
        body_type TEXT,
        colour TEXT,
        interior_color TEXT,
        engine TEXT,
        transmission TEXT,
        drivetrain TEXT,
        fuel_type TEXT,
        odometer REAL,
        mpg_city INTEGER,
        mpg_highway INTEGER,
        new_used TEXT,
        certified INTEGER,
        dealer_name TEXT,
        tags TEXT,
        description TEXT,
        ai_description TEXT,
        inventory_date TEXT,
        price REAL,
        custom_price REAL,
        msrp REAL,
        photos TEXT,
        notes TEXT,
        ai_video TEXT,
        created_at TEXT,
        updated_at TEXT,
        deleted_at TEXT
    )";

/// Timestamp used for seeded rows; mutations must produce something newer.
pub const SEED_TIMESTAMP: &str = "2024-05-01T10:00:00+00:00";

/// Create an in-memory store with an empty vehicles table.
pub async fn setup_store() -> Arc<Store> {
    let store = Store::connect("sqlite::memory:").await.unwrap();
    executor::execute(store.pool(), CREATE_VEHICLES_TABLE, &[])
        .await
        .unwrap();
    Arc::new(store)
}

/// Execute a raw statement against the test store.
pub async fn exec(store: &Store, sql: &str, args: &[SqlArg]) {
    executor::execute(store.pool(), sql, args).await.unwrap();
}

fn opt_str(value: Option<&str>) -> SqlArg {
    match value {
        Some(v) => SqlArg::String(v.to_string()),
        None => SqlArg::Null,
    }
}

fn opt_f64(value: Option<f64>) -> SqlArg {
    match value {
        Some(v) => SqlArg::Float(v),
        None => SqlArg::Null,
    }
}

/// Insert a vehicle row with the fields most tests care about.
pub async fn seed_vehicle(
    store: &Store,
    id: i64,
    vin: Option<&str>,
    stock_number: Option<&str>,
    make: &str,
    model: &str,
    year: i64,
    price: Option<f64>,
) {
    exec(
        store,
        "INSERT INTO vehicles (id, vin, stock_number, make, model, year, price, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        &[
            SqlArg::Int(id),
            opt_str(vin),
            opt_str(stock_number),
            SqlArg::String(make.to_string()),
            SqlArg::String(model.to_string()),
            SqlArg::Int(year),
            opt_f64(price),
            SqlArg::String(SEED_TIMESTAMP.to_string()),
            SqlArg::String(SEED_TIMESTAMP.to_string()),
        ],
    )
    .await;
}

/// Mark a seeded row as soft-deleted.
pub async fn mark_deleted(store: &Store, id: i64) {
    exec(
        store,
        "UPDATE vehicles SET deleted_at = ? WHERE id = ?",
        &[
            SqlArg::String(SEED_TIMESTAMP.to_string()),
            SqlArg::Int(id),
        ],
    )
    .await;
}

/// Set a single text column on a seeded row.
pub async fn set_text_column(store: &Store, id: i64, column: &str, value: &str) {
    let sql = format!("UPDATE vehicles SET {} = ? WHERE id = ?", column);
    exec(
        store,
        &sql,
        &[SqlArg::String(value.to_string()), SqlArg::Int(id)],
    )
    .await;
}

/// Fetch the write-path projection of a row, or None if it is gone.
pub async fn ref_by_id(store: &Store, id: i64) -> Option<VehicleRef> {
    let sql = format!(
        "SELECT {} FROM vehicles WHERE id = ?",
        VEHICLE_REF_COLUMNS
    );
    executor::fetch_all::<VehicleRef>(store.pool(), &sql, &[SqlArg::Int(id)])
        .await
        .unwrap()
        .pop()
}

/// Fetch the full row, or None if it is gone.
pub async fn vehicle_by_id(store: &Store, id: i64) -> Option<Vehicle> {
    let sql = format!("SELECT {} FROM vehicles WHERE id = ?", VEHICLE_COLUMNS);
    executor::fetch_all::<Vehicle>(store.pool(), &sql, &[SqlArg::Int(id)])
        .await
        .unwrap()
        .pop()
}

/// Count all rows, including soft-deleted ones.
pub async fn total_rows(store: &Store) -> usize {
    let sql = format!("SELECT {} FROM vehicles", VEHICLE_REF_COLUMNS);
    executor::fetch_all::<VehicleRef>(store.pool(), &sql, &[])
        .await
        .unwrap()
        .len()
}
