//! Vehicle row types and projections.
//!
//! The `vehicles` table is owned by an external inventory sync that overwrites
//! rows roughly every two hours; this layer only reads and mutates it. Two
//! projections exist: the full [`Vehicle`] row for the read path, and the
//! minimal [`VehicleRef`] the write paths use to confirm identity and
//! pre-mutation state before mutating by id.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default number of rows returned by the filtered read.
pub const DEFAULT_RESULT_LIMIT: u32 = 50;

/// Maximum number of rows returned by the filtered read.
pub const MAX_RESULT_LIMIT: u32 = 200;

/// Columns selected for the full read-path projection, in declaration order.
pub const VEHICLE_COLUMNS: &str = "id, vin, stock_number, make, model, year, series, body_type, \
     colour, interior_color, engine, transmission, drivetrain, fuel_type, odometer, \
     mpg_city, mpg_highway, new_used, certified, dealer_name, tags, description, \
     ai_description, inventory_date, price, custom_price, msrp, photos, notes, ai_video, \
     created_at, updated_at, deleted_at";

/// Columns selected for the write-path projection: identity plus the fields a
/// mutation needs for before/after reporting.
pub const VEHICLE_REF_COLUMNS: &str = "id, vin, stock_number, notes, ai_video, deleted_at";

/// A full vehicle listing row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub vin: Option<String>,
    pub stock_number: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub series: Option<String>,
    pub body_type: Option<String>,
    pub colour: Option<String>,
    pub interior_color: Option<String>,
    pub engine: Option<String>,
    pub transmission: Option<String>,
    pub drivetrain: Option<String>,
    pub fuel_type: Option<String>,
    pub odometer: Option<f64>,
    pub mpg_city: Option<i64>,
    pub mpg_highway: Option<i64>,
    pub new_used: Option<String>,
    pub certified: Option<bool>,
    pub dealer_name: Option<String>,
    pub tags: Option<String>,
    pub description: Option<String>,
    pub ai_description: Option<String>,
    pub inventory_date: Option<String>,
    pub price: Option<f64>,
    pub custom_price: Option<f64>,
    pub msrp: Option<f64>,
    /// JSON array of photo URLs, kept opaque; only the count is surfaced.
    pub photos: Option<String>,
    pub notes: Option<String>,
    pub ai_video: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Number of photos in the stored collection.
    pub fn photo_count(&self) -> usize {
        self.photos
            .as_deref()
            .and_then(|p| serde_json::from_str::<Vec<serde_json::Value>>(p).ok())
            .map(|v| v.len())
            .unwrap_or(0)
    }
}

/// Minimal projection used by the write paths.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VehicleRef {
    pub id: i64,
    pub vin: Option<String>,
    pub stock_number: Option<String>,
    pub notes: Option<String>,
    pub ai_video: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl VehicleRef {
    /// Short identity line for response text, preferring human-facing fields.
    pub fn identity(&self) -> String {
        match (&self.vin, &self.stock_number) {
            (Some(vin), Some(stock)) => format!("VIN {} (stock {})", vin, stock),
            (Some(vin), None) => format!("VIN {}", vin),
            (None, Some(stock)) => format!("stock {}", stock),
            (None, None) => format!("id {}", self.id),
        }
    }
}

/// Sort keys accepted by the filtered read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    UpdatedAt,
    CreatedAt,
    Year,
    Price,
    Odometer,
}

impl SortKey {
    pub fn column(self) -> &'static str {
        match self {
            Self::UpdatedAt => "updated_at",
            Self::CreatedAt => "created_at",
            Self::Year => "year",
            Self::Price => "price",
            Self::Odometer => "odometer",
        }
    }
}

/// Sort direction for the filtered read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}
