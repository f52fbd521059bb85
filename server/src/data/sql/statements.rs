//! Statement text for the kinetics table
//!
//! Builds the three read statements the store runs: the filtered count, the
//! filtered page and the distinct-values lookup. Column names come from the
//! schema registry and the table name from validated configuration; user
//! values only ever travel as bound parameters.

use crate::data::filters::Predicate;
use crate::data::schema::{COLUMNS, ColumnDef, ColumnType};

use super::{SqlDialect, SqlParams};

/// SQL text plus the values bound to its placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: SqlParams,
}

/// Render an optional predicate into a ` WHERE ...` suffix
fn where_suffix(dialect: &dyn SqlDialect, predicate: Option<&Predicate>) -> Statement {
    let mut params = SqlParams::default();
    let sql = match predicate {
        Some(p) => format!(" WHERE {}", p.to_sql(dialect, &mut params)),
        None => String::new(),
    };
    Statement { sql, params }
}

/// Select expression that casts a column to its registry type
fn select_expr(dialect: &dyn SqlDialect, column: &ColumnDef) -> String {
    let cast = match column.kind {
        ColumnType::Text => dialect.cast_to_string(column.name),
        ColumnType::Number => dialect.cast_to_float(column.name),
    };
    format!("{} AS {}", cast, column.name)
}

/// Deterministic ordering over every registry column, nulls last
fn order_by(dialect: &dyn SqlDialect) -> String {
    COLUMNS
        .iter()
        .map(|c| dialect.order_by_nulls_last(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `SELECT COUNT(*)` over the filtered rows
pub fn count_statement(
    dialect: &dyn SqlDialect,
    table: &str,
    predicate: Option<&Predicate>,
) -> Statement {
    let filter = where_suffix(dialect, predicate);
    Statement {
        sql: format!("SELECT COUNT(*) FROM {}{}", table, filter.sql),
        params: filter.params,
    }
}

/// One page of filtered rows restricted to the projection
pub fn page_statement(
    dialect: &dyn SqlDialect,
    table: &str,
    predicate: Option<&Predicate>,
    projection: &[&'static ColumnDef],
    limit: u64,
    offset: u64,
) -> Statement {
    let filter = where_suffix(dialect, predicate);
    let select = projection
        .iter()
        .map(|c| select_expr(dialect, c))
        .collect::<Vec<_>>()
        .join(", ");

    Statement {
        sql: format!(
            "SELECT {} FROM {}{} ORDER BY {} {}",
            select,
            table,
            filter.sql,
            order_by(dialect),
            dialect.limit_offset(limit, offset)
        ),
        params: filter.params,
    }
}

/// Sorted distinct non-null, non-empty values of a text column
pub fn distinct_statement(dialect: &dyn SqlDialect, table: &str, column: &ColumnDef) -> Statement {
    Statement {
        sql: format!(
            "SELECT DISTINCT {cast} AS {col} FROM {table} \
             WHERE {col} IS NOT NULL AND {cast} <> '' ORDER BY {col}",
            cast = dialect.cast_to_string(column.name),
            col = column.name,
            table = table,
        ),
        params: SqlParams::default(),
    }
}
