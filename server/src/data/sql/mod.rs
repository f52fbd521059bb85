//! SQL abstraction layer for multi-database support
//!
//! This module provides abstractions for generating SQL that works across
//! the supported store backends (PostgreSQL, SQLite).

mod dialect;
mod exec;
mod postgres_dialect;
mod sqlite_dialect;
mod statements;

pub use dialect::SqlDialect;
pub use exec::{bind_params, decode_row, with_deadline};
pub use postgres_dialect::PostgresDialect;
pub use sqlite_dialect::{CASE_FOLD_COLLATION, SqliteDialect};
pub use statements::{Statement, count_statement, distinct_statement, page_statement};

/// A typed value bound to a statement placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Number(f64),
}

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    /// Push a value and return the dialect placeholder that refers to it
    pub fn bind(&mut self, dialect: &dyn SqlDialect, value: SqlValue) -> String {
        self.values.push(value);
        dialect.placeholder(self.values.len())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_numbers_postgres_placeholders_in_order() {
        let mut params = SqlParams::default();
        assert_eq!(params.bind(&PostgresDialect, SqlValue::Text("a".into())), "$1");
        assert_eq!(params.bind(&PostgresDialect, SqlValue::Number(2.0)), "$2");
        assert_eq!(
            params.values,
            vec![SqlValue::Text("a".into()), SqlValue::Number(2.0)]
        );
    }

    #[test]
    fn bind_uses_positional_marks_on_sqlite() {
        let mut params = SqlParams::default();
        assert_eq!(params.bind(&SqliteDialect, SqlValue::Number(1.5)), "?");
        assert_eq!(params.bind(&SqliteDialect, SqlValue::Number(2.5)), "?");
        assert_eq!(params.len(), 2);
    }
}
