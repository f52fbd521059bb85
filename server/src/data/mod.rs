//! Data storage layer
//!
//! Provides read access to the kinetics table:
//! - `schema` - Fixed column registry the API validates against
//! - `filters` - Query parameter parsing and predicate building
//! - `sql` - SQL abstraction layer for multi-database support
//! - `postgres` - PostgreSQL store (shared deployments)
//! - `sqlite` - SQLite store (local use, import target)
//! - `types` - Query plans, results and records
//! - `traits` - Repository trait for multi-database support
//! - `error` - Unified error type for all backends
//!
//! ## Backend Support
//!
//! Both backends implement `KineticsRepository`; `KineticsService` selects
//! one at startup from configuration.

pub mod error;
pub mod filters;
pub mod postgres;
pub mod schema;
pub mod sql;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export backend-specific services
pub use postgres::PostgresService;
pub use sqlite::SqliteService;

// Re-export unified error type
pub use error::DataError;

// Re-export repository trait
pub use traits::KineticsRepository;

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::{AppConfig, StoreBackend};

/// Kinetics store service enum
///
/// Wraps the underlying backend-specific service (SQLite or PostgreSQL).
/// Services are stored as Arc so repository handles can be cloned cheaply.
pub enum KineticsService {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// PostgreSQL backend (for shared deployments)
    Postgres(Arc<PostgresService>),
}

impl KineticsService {
    /// Connect to the configured backend and verify the table schema
    pub async fn init(config: &AppConfig) -> Result<Self, DataError> {
        let service = Self::connect(config).await?;
        service.repository().verify_schema().await?;
        Ok(service)
    }

    /// Connect to the configured backend without checking the schema
    pub async fn connect(config: &AppConfig) -> Result<Self, DataError> {
        let database = &config.database;
        let table = database.table.as_str();
        let query_timeout = Duration::from_secs(config.query.timeout_secs);

        match database.backend {
            StoreBackend::Sqlite => {
                let service = SqliteService::init(&database.sqlite, table, query_timeout).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            StoreBackend::Postgres => {
                let pg = database.postgres.as_ref().ok_or_else(|| {
                    DataError::Config("PostgreSQL configuration required".to_string())
                })?;
                let service = PostgresService::init(pg, table, query_timeout).await?;
                Ok(Self::Postgres(Arc::new(service)))
            }
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Postgres(p) => p.close().await,
        }
    }

    /// Get the backend type
    pub fn backend(&self) -> StoreBackend {
        match self {
            Self::Sqlite(_) => StoreBackend::Sqlite,
            Self::Postgres(_) => StoreBackend::Postgres,
        }
    }

    /// Get the repository trait object for data operations
    ///
    /// This returns a boxed trait object, allowing backend-agnostic
    /// reads through the KineticsRepository interface.
    pub fn repository(&self) -> Box<dyn KineticsRepository + Send + Sync> {
        match self {
            Self::Sqlite(s) => Box::new(Arc::clone(s)),
            Self::Postgres(p) => Box::new(Arc::clone(p)),
        }
    }
}
