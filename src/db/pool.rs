//! Connection pool for the vehicles store.
//!
//! One configured connection is constructed at startup from the database URL
//! and reused across invocations. Postgres is the hosted store; SQLite is
//! supported for local development and integration tests and is pinned to a
//! single pooled connection so in-memory databases survive across calls.

use crate::error::{InventoryError, InventoryResult};
use crate::sql::Dialect;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Backend-specific pool.
#[derive(Debug, Clone)]
pub enum StorePool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

/// The single configured store connection.
#[derive(Debug, Clone)]
pub struct Store {
    pool: StorePool,
}

impl Store {
    /// Connect to the store described by `url`.
    ///
    /// Accepts `postgres://` / `postgresql://` for the hosted store and
    /// `sqlite:` for local files or `sqlite::memory:`.
    pub async fn connect(url: &str) -> InventoryResult<Self> {
        let scheme = url.split(':').next().unwrap_or("").to_ascii_lowercase();
        let pool = match scheme.as_str() {
            "postgres" | "postgresql" => {
                let pool = PgPoolOptions::new()
                    .max_connections(DEFAULT_MAX_CONNECTIONS)
                    .acquire_timeout(Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS))
                    .connect(url)
                    .await
                    .map_err(|e| {
                        InventoryError::configuration(format!(
                            "failed to connect to Postgres store: {}",
                            e
                        ))
                    })?;
                StorePool::Postgres(pool)
            }
            "sqlite" => {
                let options = SqliteConnectOptions::from_str(url)
                    .map_err(|e| {
                        InventoryError::configuration(format!("invalid SQLite URL: {}", e))
                    })?
                    .create_if_missing(true);
                // A single connection keeps :memory: databases alive and
                // avoids writer contention on file databases.
                let pool = SqlitePoolOptions::new()
                    .max_connections(1)
                    .acquire_timeout(Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS))
                    .connect_with(options)
                    .await
                    .map_err(|e| {
                        InventoryError::configuration(format!(
                            "failed to open SQLite store: {}",
                            e
                        ))
                    })?;
                StorePool::Sqlite(pool)
            }
            other => {
                return Err(InventoryError::configuration(format!(
                    "unsupported database URL scheme '{}'; expected postgres:// or sqlite:",
                    other
                )));
            }
        };

        info!(backend = pool_backend(&pool), "Connected to vehicles store");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &StorePool {
        &self.pool
    }

    /// Placeholder dialect of the backing store.
    pub fn dialect(&self) -> Dialect {
        match self.pool {
            StorePool::Postgres(_) => Dialect::Postgres,
            StorePool::Sqlite(_) => Dialect::Sqlite,
        }
    }

    /// Close the pool on shutdown.
    pub async fn close(&self) {
        match &self.pool {
            StorePool::Postgres(p) => p.close().await,
            StorePool::Sqlite(p) => p.close().await,
        }
        info!("Store connection closed");
    }
}

fn pool_backend(pool: &StorePool) -> &'static str {
    match pool {
        StorePool::Postgres(_) => "postgres",
        StorePool::Sqlite(_) => "sqlite",
    }
}
