//! SQLite database service
//!
//! Provides store access for local/embedded deployments and development:
//! - WAL mode for concurrent reads during imports
//! - In-memory temp storage for fast sorting
//! - A record import path that computes derived columns
//!
//! For shared deployments, use PostgreSQL instead.

mod repository_impl;
pub mod schema;

pub use sqlx::SqlitePool;

use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use tracing::log::LevelFilter;

use crate::core::config::SqliteConfig;
use crate::core::constants::{SQLITE_BUSY_TIMEOUT_SECS, SQLITE_CACHE_SIZE, SQLITE_MAX_CONNECTIONS};
use crate::data::error::DataError;
use crate::data::sql::CASE_FOLD_COLLATION;
use crate::data::types::{CellValue, KineticRecord};
use crate::utils::string::cmp_ignore_case;

/// Register the functions every store connection relies on
fn with_store_functions(options: SqliteConnectOptions) -> SqliteConnectOptions {
    options.collation(CASE_FOLD_COLLATION, cmp_ignore_case)
}

/// SQLite database service
///
/// Handles connection pooling for the kinetics table.
/// Should be created once at server startup and shared across all modules.
pub struct SqliteService {
    pool: SqlitePool,
    table: String,
    query_timeout: Duration,
}

impl SqliteService {
    /// Initialize the database service
    ///
    /// Creates the database file (and its parent directory) if it doesn't
    /// exist and configures connection options with optimized pragmas.
    pub async fn init(
        config: &SqliteConfig,
        table: &str,
        query_timeout: Duration,
    ) -> Result<Self, DataError> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = with_store_functions(SqliteConnectOptions::new())
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
            .pragma("cache_size", SQLITE_CACHE_SIZE)
            .pragma("temp_store", "MEMORY")
            .log_statements(LevelFilter::Trace);

        let pool = SqlitePoolOptions::new()
            .max_connections(SQLITE_MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(DataError::from_sqlite)?;

        tracing::debug!(path = %config.path.display(), table, "SqliteService initialized");
        Ok(Self::from_pool(pool, table, query_timeout))
    }

    /// Create a SqliteService from an existing pool
    pub fn from_pool(pool: SqlitePool, table: &str, query_timeout: Duration) -> Self {
        Self {
            pool,
            table: table.to_string(),
            query_timeout,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the kinetics table and its indexes if missing
    pub async fn create_table(&self) -> Result<(), DataError> {
        sqlx::raw_sql(&schema::create_table_sql(&self.table))
            .execute(&self.pool)
            .await
            .map_err(DataError::from_sqlite)?;
        Ok(())
    }

    /// Insert records in one transaction, returning the number stored
    pub async fn insert_records(&self, records: &[KineticRecord]) -> Result<u64, DataError> {
        let sql = schema::insert_sql(&self.table);
        let mut tx = self.pool.begin().await.map_err(DataError::from_sqlite)?;

        for record in records {
            let mut query = sqlx::query(&sql);
            for cell in record.cells() {
                query = match cell {
                    CellValue::Null => query.bind(None::<String>),
                    CellValue::Text(s) => query.bind(s),
                    CellValue::Number(n) => query.bind(n),
                };
            }
            query
                .execute(&mut *tx)
                .await
                .map_err(DataError::from_sqlite)?;
        }

        tx.commit().await.map_err(DataError::from_sqlite)?;
        tracing::debug!(count = records.len(), table = %self.table, "Records inserted");
        Ok(records.len() as u64)
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }
}
