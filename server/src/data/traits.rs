//! Repository traits for database backends
//!
//! This module defines the trait that provides a unified interface for
//! read access to the kinetics table. Each backend (SQLite, PostgreSQL)
//! implements it with its own specific logic.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::schema::ColumnDef;
use crate::data::types::{QueryPlan, QueryResult};

/// Read-only repository over the kinetics table
///
/// Implemented by the SQLite and PostgreSQL backends.
#[async_trait]
pub trait KineticsRepository: Send + Sync {
    /// Count matching rows and fetch one page
    ///
    /// Both reads run on the same pooled connection.
    async fn query(&self, plan: &QueryPlan) -> Result<QueryResult, DataError>;

    /// Sorted distinct non-null values of a text column
    async fn distinct_values(&self, column: &'static ColumnDef) -> Result<Vec<String>, DataError>;

    /// Check that the table exposes every registry column
    async fn verify_schema(&self) -> Result<(), DataError>;

    /// Round-trip to the store
    async fn ping(&self) -> Result<(), DataError>;
}
