//! KineticsRepository trait implementation for SQLite

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::Row as _;
use sqlx::Sqlite;

use crate::data::error::DataError;
use crate::data::schema::{self, ColumnDef};
use crate::data::sql::{
    SqliteDialect, bind_params, count_statement, decode_row, distinct_statement, page_statement,
    with_deadline,
};
use crate::data::traits::KineticsRepository;
use crate::data::types::{QueryPlan, QueryResult};

use super::SqliteService;

const BACKEND: &str = "sqlite";

impl SqliteService {
    async fn run_query(&self, plan: &QueryPlan) -> Result<QueryResult, DataError> {
        let dialect = &SqliteDialect;
        let predicate = plan.predicate.as_ref();
        let count = count_statement(dialect, &self.table, predicate);
        let page = page_statement(
            dialect,
            &self.table,
            predicate,
            plan.projection.columns(),
            plan.limit,
            plan.offset,
        );

        let mut conn = self.pool.acquire().await.map_err(DataError::from_sqlite)?;

        let total: i64 = bind_params(sqlx::query::<Sqlite>(&count.sql), &count.params)
            .fetch_one(&mut *conn)
            .await
            .and_then(|row| row.try_get(0))
            .map_err(DataError::from_sqlite)?;

        let rows = bind_params(sqlx::query::<Sqlite>(&page.sql), &page.params)
            .fetch_all(&mut *conn)
            .await
            .map_err(DataError::from_sqlite)?;

        let rows = rows
            .iter()
            .map(|row| decode_row(row, plan.projection.columns()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(DataError::from_sqlite)?;

        Ok(QueryResult {
            total: total.max(0) as u64,
            rows,
        })
    }
}

#[async_trait]
impl KineticsRepository for Arc<SqliteService> {
    async fn query(&self, plan: &QueryPlan) -> Result<QueryResult, DataError> {
        with_deadline(BACKEND, self.query_timeout, self.run_query(plan)).await
    }

    async fn distinct_values(&self, column: &'static ColumnDef) -> Result<Vec<String>, DataError> {
        let stmt = distinct_statement(&SqliteDialect, &self.table, column);
        with_deadline(BACKEND, self.query_timeout, async {
            sqlx::query_scalar::<_, String>(&stmt.sql)
                .fetch_all(&self.pool)
                .await
                .map_err(DataError::from_sqlite)
        })
        .await
    }

    async fn verify_schema(&self) -> Result<(), DataError> {
        let actual: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
            .bind(&self.table)
            .fetch_all(&self.pool)
            .await
            .map_err(DataError::from_sqlite)?;

        let missing = schema::missing_columns(actual.iter().map(String::as_str));
        if !missing.is_empty() {
            return Err(DataError::SchemaMismatch {
                backend: BACKEND,
                table: self.table.clone(),
                missing: missing.into_iter().map(String::from).collect(),
            });
        }
        tracing::debug!(table = %self.table, "SQLite schema verified");
        Ok(())
    }

    async fn ping(&self) -> Result<(), DataError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(DataError::from_sqlite)?;
        Ok(())
    }
}
