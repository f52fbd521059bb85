//! Unified error type for data layer
//!
//! This module provides a unified error type that can represent errors from
//! both store backends (PostgreSQL, SQLite).

use thiserror::Error;

/// SQLSTATE raised by PostgreSQL when `statement_timeout` cancels a query
const PG_QUERY_CANCELED: &str = "57014";

/// Unified error type for data layer operations
///
/// This error type wraps backend-specific errors while preserving context
/// about which backend generated the error.
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// PostgreSQL database error
    #[error("PostgreSQL error: {0}")]
    Postgres(sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input (record import)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Query exceeded its deadline
    #[error("Query timeout on {backend}")]
    Timeout { backend: &'static str },

    /// Backend not available
    #[error("Backend {backend} is not available: {reason}")]
    BackendUnavailable {
        backend: &'static str,
        reason: String,
    },

    /// The configured table lacks columns the API serves
    #[error("Table {table} on {backend} is missing columns: {}", .missing.join(", "))]
    SchemaMismatch {
        backend: &'static str,
        table: String,
        missing: Vec<String>,
    },
}

impl DataError {
    /// Classify a SQLite error
    pub fn from_sqlite(e: sqlx::Error) -> Self {
        if is_connection_error(&e) {
            return Self::backend_unavailable("sqlite", e.to_string());
        }
        Self::Sqlite(e)
    }

    /// Classify a PostgreSQL error
    pub fn from_postgres(e: sqlx::Error) -> Self {
        if is_connection_error(&e) {
            return Self::backend_unavailable("postgres", e.to_string());
        }
        if let sqlx::Error::Database(db) = &e
            && db.code().as_deref() == Some(PG_QUERY_CANCELED)
        {
            return Self::timeout("postgres");
        }
        Self::Postgres(e)
    }

    /// Create a timeout error
    pub fn timeout(backend: &'static str) -> Self {
        Self::Timeout { backend }
    }

    /// Create a backend unavailable error
    pub fn backend_unavailable(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            backend,
            reason: reason.into(),
        }
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
            Self::Timeout { backend } => backend,
            Self::BackendUnavailable { backend, .. } => backend,
            Self::SchemaMismatch { backend, .. } => backend,
            Self::Config(_) | Self::Io(_) | Self::Json(_) => "unknown",
        }
    }
}

fn is_connection_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed
    )
}
