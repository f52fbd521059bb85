//! KineticsRepository trait implementation for PostgreSQL

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::Postgres;
use sqlx::Row as _;

use crate::data::error::DataError;
use crate::data::schema::{self, ColumnDef};
use crate::data::sql::{
    PostgresDialect, bind_params, count_statement, decode_row, distinct_statement, page_statement,
    with_deadline,
};
use crate::data::traits::KineticsRepository;
use crate::data::types::{QueryPlan, QueryResult};

use super::PostgresService;

const BACKEND: &str = "postgres";

/// Split `schema.table` into its parts
fn split_table(table: &str) -> (Option<&str>, &str) {
    match table.split_once('.') {
        Some((schema, name)) => (Some(schema), name),
        None => (None, table),
    }
}

impl PostgresService {
    async fn run_query(&self, plan: &QueryPlan) -> Result<QueryResult, DataError> {
        let dialect = &PostgresDialect;
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

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(DataError::from_postgres)?;

        let total: i64 = bind_params(sqlx::query::<Postgres>(&count.sql), &count.params)
            .fetch_one(&mut *conn)
            .await
            .and_then(|row| row.try_get(0))
            .map_err(DataError::from_postgres)?;

        let rows = bind_params(sqlx::query::<Postgres>(&page.sql), &page.params)
            .fetch_all(&mut *conn)
            .await
            .map_err(DataError::from_postgres)?;

        let rows = rows
            .iter()
            .map(|row| decode_row(row, plan.projection.columns()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(DataError::from_postgres)?;

        Ok(QueryResult {
            total: total.max(0) as u64,
            rows,
        })
    }
}

#[async_trait]
impl KineticsRepository for Arc<PostgresService> {
    async fn query(&self, plan: &QueryPlan) -> Result<QueryResult, DataError> {
        with_deadline(BACKEND, self.query_timeout, self.run_query(plan)).await
    }

    async fn distinct_values(&self, column: &'static ColumnDef) -> Result<Vec<String>, DataError> {
        let stmt = distinct_statement(&PostgresDialect, &self.table, column);
        with_deadline(BACKEND, self.query_timeout, async {
            sqlx::query_scalar::<_, String>(&stmt.sql)
                .fetch_all(&self.pool)
                .await
                .map_err(DataError::from_postgres)
        })
        .await
    }

    async fn verify_schema(&self) -> Result<(), DataError> {
        let (table_schema, table_name) = split_table(&self.table);
        let actual: Vec<String> = match table_schema {
            Some(table_schema) => {
                sqlx::query_scalar::<_, String>(
                    "SELECT column_name::TEXT FROM information_schema.columns \
                     WHERE table_schema = $1 AND table_name = $2",
                )
                .bind(table_schema)
                .bind(table_name)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar::<_, String>(
                    "SELECT column_name::TEXT FROM information_schema.columns \
                     WHERE table_schema = ANY(current_schemas(false)) AND table_name = $1",
                )
                .bind(table_name)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(DataError::from_postgres)?;

        let missing = schema::missing_columns(actual.iter().map(String::as_str));
        if !missing.is_empty() {
            return Err(DataError::SchemaMismatch {
                backend: BACKEND,
                table: self.table.clone(),
                missing: missing.into_iter().map(String::from).collect(),
            });
        }
        tracing::debug!(table = %self.table, "PostgreSQL schema verified");
        Ok(())
    }

    async fn ping(&self) -> Result<(), DataError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(DataError::from_postgres)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Query execution against PostgreSQL requires a running instance; the
    // shared statement text is covered in data::sql.
    use super::*;

    #[test]
    fn split_table_handles_schema_prefix() {
        assert_eq!(split_table("oed.oed_data"), (Some("oed"), "oed_data"));
        assert_eq!(split_table("oed_data"), (None, "oed_data"));
    }
}
