//! Statement execution against the store.
//!
//! Thin binding layer: every statement arrives fully built with its ordered
//! bind values, is bound per backend, and is awaited to completion. The
//! database-specific submodules are intentionally parallel so differences
//! stay obvious.

use crate::db::pool::StorePool;
use crate::sql::SqlArg;
use sqlx::FromRow;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use tracing::debug;

/// Fetch all rows for a built SELECT (or `RETURNING`) statement.
pub async fn fetch_all<T>(pool: &StorePool, sql: &str, args: &[SqlArg]) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    debug!(sql = %sql, args = args.len(), "Fetching rows");
    match pool {
        StorePool::Postgres(p) => postgres::fetch_all(p, sql, args).await,
        StorePool::Sqlite(p) => sqlite::fetch_all(p, sql, args).await,
    }
}

/// Execute a built write statement and return the number of affected rows.
pub async fn execute(pool: &StorePool, sql: &str, args: &[SqlArg]) -> Result<u64, sqlx::Error> {
    debug!(sql = %sql, args = args.len(), "Executing write");
    match pool {
        StorePool::Postgres(p) => postgres::execute(p, sql, args).await,
        StorePool::Sqlite(p) => sqlite::execute(p, sql, args).await,
    }
}

mod postgres {
    use super::*;
    use sqlx::PgPool;
    use sqlx::postgres::PgArguments;
    use sqlx::query::{Query, QueryAs};

    pub async fn fetch_all<T>(
        pool: &PgPool,
        sql: &str,
        args: &[SqlArg],
    ) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        for arg in args {
            query = bind_arg_as(query, arg);
        }
        query.fetch_all(pool).await
    }

    pub async fn execute(pool: &PgPool, sql: &str, args: &[SqlArg]) -> Result<u64, sqlx::Error> {
        let mut query = sqlx::query(sql);
        for arg in args {
            query = bind_arg(query, arg);
        }
        Ok(query.execute(pool).await?.rows_affected())
    }

    fn bind_arg<'q>(
        query: Query<'q, sqlx::Postgres, PgArguments>,
        arg: &'q SqlArg,
    ) -> Query<'q, sqlx::Postgres, PgArguments> {
        match arg {
            SqlArg::Null => query.bind(None::<String>),
            SqlArg::Bool(v) => query.bind(*v),
            SqlArg::Int(v) => query.bind(*v),
            SqlArg::Float(v) => query.bind(*v),
            SqlArg::String(v) => query.bind(v.as_str()),
            SqlArg::Timestamp(v) => query.bind(*v),
        }
    }

    fn bind_arg_as<'q, T>(
        query: QueryAs<'q, sqlx::Postgres, T, PgArguments>,
        arg: &'q SqlArg,
    ) -> QueryAs<'q, sqlx::Postgres, T, PgArguments> {
        match arg {
            SqlArg::Null => query.bind(None::<String>),
            SqlArg::Bool(v) => query.bind(*v),
            SqlArg::Int(v) => query.bind(*v),
            SqlArg::Float(v) => query.bind(*v),
            SqlArg::String(v) => query.bind(v.as_str()),
            SqlArg::Timestamp(v) => query.bind(*v),
        }
    }
}

mod sqlite {
    use super::*;
    use sqlx::SqlitePool;
    use sqlx::query::{Query, QueryAs};
    use sqlx::sqlite::SqliteArguments;

    pub async fn fetch_all<T>(
        pool: &SqlitePool,
        sql: &str,
        args: &[SqlArg],
    ) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut query = sqlx::query_as::<_, T>(sql);
        for arg in args {
            query = bind_arg_as(query, arg);
        }
        query.fetch_all(pool).await
    }

    pub async fn execute(pool: &SqlitePool, sql: &str, args: &[SqlArg]) -> Result<u64, sqlx::Error> {
        let mut query = sqlx::query(sql);
        for arg in args {
            query = bind_arg(query, arg);
        }
        Ok(query.execute(pool).await?.rows_affected())
    }

    fn bind_arg<'q>(
        query: Query<'q, sqlx::Sqlite, SqliteArguments<'q>>,
        arg: &'q SqlArg,
    ) -> Query<'q, sqlx::Sqlite, SqliteArguments<'q>> {
        match arg {
            SqlArg::Null => query.bind(None::<String>),
            SqlArg::Bool(v) => query.bind(*v),
            SqlArg::Int(v) => query.bind(*v),
            SqlArg::Float(v) => query.bind(*v),
            SqlArg::String(v) => query.bind(v.as_str()),
            SqlArg::Timestamp(v) => query.bind(*v),
        }
    }

    fn bind_arg_as<'q, T>(
        query: QueryAs<'q, sqlx::Sqlite, T, SqliteArguments<'q>>,
        arg: &'q SqlArg,
    ) -> QueryAs<'q, sqlx::Sqlite, T, SqliteArguments<'q>> {
        match arg {
            SqlArg::Null => query.bind(None::<String>),
            SqlArg::Bool(v) => query.bind(*v),
            SqlArg::Int(v) => query.bind(*v),
            SqlArg::Float(v) => query.bind(*v),
            SqlArg::String(v) => query.bind(v.as_str()),
            SqlArg::Timestamp(v) => query.bind(*v),
        }
    }
}
