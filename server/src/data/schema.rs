//! Schema registry for the kinetics dataset
//!
//! The dataset is a single pre-joined table with a fixed column set. Every
//! column name the API accepts (filters, projection, metadata lookups) is
//! checked against this registry before any SQL is built.

use std::fmt;

/// Value type of a dataset column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Number,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Text => write!(f, "text"),
            ColumnType::Number => write!(f, "number"),
        }
    }
}

/// Column definition in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnType,
    /// Accepts `%` wildcard patterns in addition to literal values
    pub wildcard: bool,
}

impl ColumnDef {
    const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnType::Text,
            wildcard: false,
        }
    }

    const fn pattern(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnType::Text,
            wildcard: true,
        }
    }

    const fn number(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnType::Number,
            wildcard: false,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == ColumnType::Text
    }

    /// Numeric columns support `_min`/`_max` range bounds
    pub fn supports_range(&self) -> bool {
        self.kind == ColumnType::Number
    }
}

/// Wildcard marker accepted in pattern-enabled columns
pub const WILDCARD: char = '%';

/// Suffix for inclusive lower bounds on numeric columns
pub const MIN_SUFFIX: &str = "_min";

/// Suffix for inclusive upper bounds on numeric columns
pub const MAX_SUFFIX: &str = "_max";

/// Canonical column order of the dataset
pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef::pattern("ec"),
    ColumnDef::text("substrate"),
    ColumnDef::text("organism"),
    ColumnDef::text("uniprot"),
    ColumnDef::text("enzymetype"),
    ColumnDef::number("ph"),
    ColumnDef::number("temperature"),
    ColumnDef::text("smiles"),
    ColumnDef::number("kcat_value"),
    ColumnDef::number("kcat_pubmedid"),
    ColumnDef::text("kcat_unit"),
    ColumnDef::number("km_value"),
    ColumnDef::number("km_pubmedid"),
    ColumnDef::text("km_unit"),
    ColumnDef::number("kcatkm_value"),
    ColumnDef::number("kcatkm_pubmedid"),
    ColumnDef::text("kcatkm_unit"),
    ColumnDef::number("kcatkm_threshold_delta"),
];

/// Look up a column by its exact name
pub fn column(name: &str) -> Option<&'static ColumnDef> {
    COLUMNS.iter().find(|c| c.name == name)
}

/// Position of a column in canonical order
pub fn position(name: &str) -> Option<usize> {
    COLUMNS.iter().position(|c| c.name == name)
}

/// All column names in canonical order
pub fn column_names() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|c| c.name)
}

/// Resolve a `<column>_min` / `<column>_max` key to its numeric column.
///
/// Returns the column and `true` for a lower bound, `false` for an upper bound.
pub fn range_bound(key: &str) -> Option<(&'static ColumnDef, bool)> {
    let (name, is_min) = if let Some(name) = key.strip_suffix(MIN_SUFFIX) {
        (name, true)
    } else if let Some(name) = key.strip_suffix(MAX_SUFFIX) {
        (name, false)
    } else {
        return None;
    };

    column(name)
        .filter(|c| c.supports_range())
        .map(|c| (c, is_min))
}

/// Columns missing from a store's actual column list
pub fn missing_columns<'a, I>(actual: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let actual: Vec<String> = actual.into_iter().map(|c| c.to_lowercase()).collect();
    column_names()
        .filter(|name| !actual.iter().any(|a| a == name))
        .collect()
}
