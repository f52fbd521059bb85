//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL syntax.

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (? vs $1)
/// - Numeric and text casts
/// - NULL ordering
/// - Case-insensitive text comparison
/// - Limit/offset clauses
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Cast a column to string type
    ///
    /// - SQLite: `CAST(col AS TEXT)`
    /// - PostgreSQL: `col::TEXT`
    fn cast_to_string(&self, col: &str) -> String;

    /// Cast a column to a double precision float
    ///
    /// - SQLite: `CAST(col AS REAL)`
    /// - PostgreSQL: `col::DOUBLE PRECISION`
    fn cast_to_float(&self, col: &str) -> String;

    /// Ascending ORDER BY term that sorts NULLs after every value
    ///
    /// - PostgreSQL: `col ASC NULLS LAST`
    /// - SQLite: emulated with a leading `CASE WHEN col IS NULL` term
    fn order_by_nulls_last(&self, col: &str) -> String;

    /// Case-insensitive membership of `col` in the given placeholders
    ///
    /// `LOWER` on both sides by default, which folds with the database's
    /// Unicode case mapping on PostgreSQL.
    fn text_in(&self, col: &str, marks: &[String]) -> String {
        let lowered: Vec<String> = marks.iter().map(|m| format!("LOWER({})", m)).collect();
        match lowered.as_slice() {
            [single] => format!("LOWER({}) = {}", col, single),
            _ => format!("LOWER({}) IN ({})", col, lowered.join(", ")),
        }
    }

    /// Generate LIMIT/OFFSET clause
    ///
    /// Most databases use `LIMIT x OFFSET y`, but syntax may vary.
    fn limit_offset(&self, limit: u64, offset: u64) -> String {
        format!("LIMIT {} OFFSET {}", limit, offset)
    }
}
