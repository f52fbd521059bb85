//! Execution helpers shared by the store backends
//!
//! Binding, row decoding and the query deadline are the same on every
//! database; only connection handling stays in the backend modules.

use std::future::Future;
use std::time::Duration;

use sqlx::query::Query;
use sqlx::{ColumnIndex, Database, Decode, Encode, Type};

use crate::data::error::DataError;
use crate::data::schema::{ColumnDef, ColumnType};
use crate::data::types::{CellValue, Row};

use super::{SqlParams, SqlValue};

/// Bind collected parameters in placeholder order
pub fn bind_params<'q, DB>(
    mut query: Query<'q, DB, <DB as Database>::Arguments<'q>>,
    params: &'q SqlParams,
) -> Query<'q, DB, <DB as Database>::Arguments<'q>>
where
    DB: Database,
    &'q str: Encode<'q, DB> + Type<DB>,
    f64: Encode<'q, DB> + Type<DB>,
{
    for value in &params.values {
        query = match value {
            SqlValue::Text(s) => query.bind(s.as_str()),
            SqlValue::Number(n) => query.bind(*n),
        };
    }
    query
}

/// Decode a result row by position, typed by the projection
pub fn decode_row<R>(row: &R, projection: &[&'static ColumnDef]) -> Result<Row, sqlx::Error>
where
    R: sqlx::Row,
    usize: ColumnIndex<R>,
    for<'r> Option<String>: Decode<'r, R::Database> + Type<R::Database>,
    for<'r> Option<f64>: Decode<'r, R::Database> + Type<R::Database>,
{
    projection
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let cell = match col.kind {
                ColumnType::Text => CellValue::from(row.try_get::<Option<String>, _>(i)?),
                ColumnType::Number => CellValue::from(row.try_get::<Option<f64>, _>(i)?),
            };
            Ok(cell)
        })
        .collect()
}

/// Run a store operation under the configured query deadline
pub async fn with_deadline<T, F>(
    backend: &'static str,
    timeout: Duration,
    fut: F,
) -> Result<T, DataError>
where
    F: Future<Output = Result<T, DataError>>,
{
    tokio::time::timeout(timeout, fut).await.map_err(|_| {
        tracing::warn!(
            backend,
            timeout_ms = timeout.as_millis() as u64,
            "Query exceeded deadline"
        );
        DataError::timeout(backend)
    })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deadline_passes_through_results() {
        let ok = with_deadline("sqlite", Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err = with_deadline::<(), _>("postgres", Duration::from_secs(1), async {
            Err(DataError::backend_unavailable("postgres", "refused"))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, DataError::BackendUnavailable { .. }));
    }

    #[tokio::test]
    async fn deadline_elapses_into_timeout() {
        let err = with_deadline::<(), _>("postgres", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, DataError::Timeout { backend: "postgres" }));
    }
}
