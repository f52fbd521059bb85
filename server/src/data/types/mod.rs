//! Shared data types for all database backends
//!
//! This module contains types that are used by both store backends
//! (SQLite, PostgreSQL) to ensure consistent data models.

mod query;
mod record;

// Re-export query plan and result types
pub use query::{CellValue, QueryPlan, QueryResult, Row};

// Re-export record types (for import)
pub use record::KineticRecord;
