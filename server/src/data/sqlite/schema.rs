//! SQLite schema definitions
//!
//! DDL for a local kinetics table, derived from the schema registry. Used by
//! the record import and by store-backed tests; production stores are
//! provisioned upstream.

use crate::data::schema::{COLUMNS, ColumnType};
use crate::data::sql::CASE_FOLD_COLLATION;

/// Text columns that get a case-folded lookup index
const INDEXED_TEXT_COLUMNS: &[&str] = &["ec", "substrate", "organism", "uniprot"];

/// `CREATE TABLE` plus lookup indexes for the given table
pub fn create_table_sql(table: &str) -> String {
    let columns = COLUMNS
        .iter()
        .map(|c| {
            let ty = match c.kind {
                ColumnType::Text => "TEXT",
                ColumnType::Number => "REAL",
            };
            format!("    {} {}", c.name, ty)
        })
        .collect::<Vec<_>>()
        .join(",\n");

    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n);\n", table, columns);
    for col in INDEXED_TEXT_COLUMNS {
        sql.push_str(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_{col} ON {table}({col} COLLATE {CASE_FOLD_COLLATION});\n",
        ));
    }
    sql
}

/// `INSERT` statement binding every registry column in order
pub fn insert_sql(table: &str) -> String {
    let names = COLUMNS.iter().map(|c| c.name).collect::<Vec<_>>().join(", ");
    let marks = vec!["?"; COLUMNS.len()].join(", ");
    format!("INSERT INTO {} ({}) VALUES ({})", table, names, marks)
}
