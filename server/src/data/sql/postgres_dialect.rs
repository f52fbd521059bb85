//! PostgreSQL SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn cast_to_string(&self, col: &str) -> String {
        format!("{}::TEXT", col)
    }

    fn cast_to_float(&self, col: &str) -> String {
        format!("{}::DOUBLE PRECISION", col)
    }

    fn order_by_nulls_last(&self, col: &str) -> String {
        format!("{} ASC NULLS LAST", col)
    }
}
