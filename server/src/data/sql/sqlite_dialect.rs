//! SQLite SQL dialect implementation

use super::SqlDialect;

/// Collation registered on every store connection that compares text under
/// the Unicode lowercase mapping. SQLite's own `LOWER` and `NOCASE` only fold
/// ASCII letters.
pub const CASE_FOLD_COLLATION: &str = "oed_nocase";

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn cast_to_string(&self, col: &str) -> String {
        format!("CAST({} AS TEXT)", col)
    }

    fn cast_to_float(&self, col: &str) -> String {
        format!("CAST({} AS REAL)", col)
    }

    fn order_by_nulls_last(&self, col: &str) -> String {
        format!("CASE WHEN {} IS NULL THEN 1 ELSE 0 END, {} ASC", col, col)
    }

    fn text_in(&self, col: &str, marks: &[String]) -> String {
        match marks {
            [single] => format!("{} COLLATE {} = {}", col, CASE_FOLD_COLLATION, single),
            _ => format!(
                "{} COLLATE {} IN ({})",
                col,
                CASE_FOLD_COLLATION,
                marks.join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = SqliteDialect;
        assert_eq!(dialect.placeholder(1), "?");
        assert_eq!(dialect.placeholder(9), "?");
    }

    #[test]
    fn test_casts() {
        let dialect = SqliteDialect;
        assert_eq!(dialect.cast_to_string("organism"), "CAST(organism AS TEXT)");
        assert_eq!(dialect.cast_to_float("ph"), "CAST(ph AS REAL)");
    }

    #[test]
    fn test_order_by_nulls_last() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect.order_by_nulls_last("temperature"),
            "CASE WHEN temperature IS NULL THEN 1 ELSE 0 END, temperature ASC"
        );
    }

    #[test]
    fn test_text_in_uses_case_fold_collation() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect.text_in("organism", &["?".to_string()]),
            "organism COLLATE oed_nocase = ?"
        );
        assert_eq!(
            dialect.text_in("ec", &["?".to_string(), "?".to_string()]),
            "ec COLLATE oed_nocase IN (?, ?)"
        );
    }
}
