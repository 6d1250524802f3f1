//! Row lookup and mutation execution for the vehicles table.
//!
//! All writes follow the lookup-then-mutate-by-id pattern: the target set is
//! captured as explicit row ids during lookup, and the mutation is scoped to
//! that id set rather than re-running the original filter. The upstream
//! inventory sync can change which rows a filter matches at any time; pinning
//! the ids closes the read-then-write race within one invocation.

use crate::db::executor;
use crate::db::pool::Store;
use crate::error::{InventoryError, InventoryResult};
use crate::models::{
    SortKey, SortOrder, VEHICLE_COLUMNS, VEHICLE_REF_COLUMNS, Vehicle, VehicleRef,
};
use crate::sql::{AssignmentSet, Identifier, PredicateSet};
use std::sync::Arc;
use tracing::info;

/// Whether a lookup respects the soft-delete rule.
///
/// Every tool except hard delete sees only rows with `deleted_at IS NULL`;
/// hard delete targets rows to permanently remove, so it looks past the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    VisibleOnly,
    IncludeDeleted,
}

/// Store operations scoped to the vehicles table.
#[derive(Clone)]
pub struct VehicleStore {
    store: Arc<Store>,
}

impl VehicleStore {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Filtered read: visible rows matching the predicates, sorted and capped.
    pub async fn find(
        &self,
        filter: &PredicateSet,
        sort: SortKey,
        order: SortOrder,
        limit: u32,
    ) -> InventoryResult<Vec<Vehicle>> {
        let dialect = self.store.dialect();
        let mut next = 1;
        let mut sql = format!("SELECT {} FROM vehicles", VEHICLE_COLUMNS);
        let where_sql = filter.sql(dialect, &mut next);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }
        sql.push_str(&format!(
            " ORDER BY {} {} LIMIT {}",
            sort.column(),
            order.sql(),
            limit
        ));

        executor::fetch_all::<Vehicle>(self.store.pool(), &sql, filter.args())
            .await
            .map_err(InventoryError::store_read)
    }

    /// Write-path lookup: the minimal projection of rows matching the predicates.
    pub async fn lookup_refs(&self, filter: &PredicateSet) -> InventoryResult<Vec<VehicleRef>> {
        let dialect = self.store.dialect();
        let mut next = 1;
        let mut sql = format!("SELECT {} FROM vehicles", VEHICLE_REF_COLUMNS);
        let where_sql = filter.sql(dialect, &mut next);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        executor::fetch_all::<VehicleRef>(self.store.pool(), &sql, filter.args())
            .await
            .map_err(InventoryError::store_read)
    }

    /// Resolve an identifier to at most one row.
    ///
    /// Zero matches is a defined empty result, not an error. More than one
    /// match breaks the uniqueness assumption and aborts the operation.
    pub async fn lookup_one(
        &self,
        ident: &Identifier,
        visibility: Visibility,
    ) -> InventoryResult<Option<VehicleRef>> {
        let mut filter = PredicateSet::new();
        if visibility == Visibility::VisibleOnly {
            filter.visible_only();
        }
        filter.eq(ident.column(), ident.arg());

        let mut rows = self.lookup_refs(&filter).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(Some(rows.remove(0))),
            count => Err(InventoryError::multiple_matches(
                ident.column(),
                ident_value(ident),
                count,
            )),
        }
    }

    /// Apply assignments to the captured id set and return the post-mutation
    /// projection of the affected rows.
    pub async fn update_by_ids(
        &self,
        ids: &[i64],
        assignments: &AssignmentSet,
    ) -> InventoryResult<Vec<VehicleRef>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let dialect = self.store.dialect();
        let mut next = 1;
        let set_sql = assignments.sql(dialect, &mut next);
        let mut target = PredicateSet::new();
        target.id_in(ids);
        let where_sql = target.sql(dialect, &mut next);

        let sql = format!(
            "UPDATE vehicles SET {} WHERE {} RETURNING {}",
            set_sql, where_sql, VEHICLE_REF_COLUMNS
        );
        let mut args = assignments.args().to_vec();
        args.extend_from_slice(target.args());

        let rows = executor::fetch_all::<VehicleRef>(self.store.pool(), &sql, &args)
            .await
            .map_err(InventoryError::store_write)?;

        info!(
            rows = rows.len(),
            columns = assignments.len(),
            "Updated vehicles by id set"
        );
        Ok(rows)
    }

    /// Permanently delete the captured id set. Ignores the soft-delete flag.
    pub async fn delete_by_ids(&self, ids: &[i64]) -> InventoryResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let dialect = self.store.dialect();
        let mut next = 1;
        let mut target = PredicateSet::new();
        target.id_in(ids);
        let where_sql = target.sql(dialect, &mut next);

        let sql = format!("DELETE FROM vehicles WHERE {}", where_sql);
        let deleted = executor::execute(self.store.pool(), &sql, target.args())
            .await
            .map_err(InventoryError::store_write)?;

        info!(rows = deleted, "Hard-deleted vehicles by id set");
        Ok(deleted)
    }
}

fn ident_value(ident: &Identifier) -> String {
    match ident {
        Identifier::Id(v) => v.to_string(),
        Identifier::Vin(v) | Identifier::StockNumber(v) => v.clone(),
    }
}
