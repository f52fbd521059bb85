//! Filter type definitions
//!
//! Defines the validated, request-local form of a data query: per-column
//! filters, projection, pagination and output format.

use std::fmt;

use thiserror::Error;

use crate::data::schema::{COLUMNS, ColumnDef};
use crate::utils::string::eq_ignore_case;

/// Validation failures raised while parsing query parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Unknown column or parameter: {key}")]
    UnknownColumn { key: String },

    #[error("Parameter '{key}' must be a finite number, got '{value}'")]
    BadNumericValue { key: String, value: String },

    #[error("Parameter '{key}' must be a non-negative integer, got '{value}'")]
    BadInteger { key: String, value: String },

    #[error("limit {limit} exceeds the maximum of {max}")]
    LimitTooLarge { limit: u64, max: u64 },

    #[error("Invalid format '{value}', expected 'json' or 'csv'")]
    InvalidFormat { value: String },

    #[error("Parameter '{key}' may only be given once")]
    DuplicateParameter { key: String },

    #[error("Column '{column}' does not support value listing")]
    ColumnNotSupported { column: String },
}

impl FilterError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownColumn { .. } => "UNKNOWN_COLUMN",
            Self::BadNumericValue { .. } => "BAD_NUMERIC_VALUE",
            Self::BadInteger { .. } => "BAD_INTEGER",
            Self::LimitTooLarge { .. } => "LIMIT_TOO_LARGE",
            Self::InvalidFormat { .. } => "INVALID_FORMAT",
            Self::DuplicateParameter { .. } => "DUPLICATE_PARAMETER",
            Self::ColumnNotSupported { .. } => "COLUMN_NOT_SUPPORTED",
        }
    }
}

/// Response body format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse a format name case-insensitively
    pub fn parse(value: &str) -> Result<Self, FilterError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(FilterError::InvalidFormat {
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality set and wildcard patterns on a text column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFilter {
    /// Literal values, unique case-insensitively, in first-seen order
    pub values: Vec<String>,
    /// `%` patterns (wildcard-enabled columns only)
    pub patterns: Vec<String>,
}

impl TextFilter {
    pub(super) fn push_value(&mut self, value: &str) {
        push_unique_ci(&mut self.values, value);
    }

    pub(super) fn push_pattern(&mut self, pattern: &str) {
        push_unique_ci(&mut self.patterns, pattern);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.patterns.is_empty()
    }
}

fn push_unique_ci(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| eq_ignore_case(v, value)) {
        list.push(value.to_string());
    }
}

/// Equality set and inclusive range on a numeric column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberFilter {
    pub values: Vec<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberFilter {
    pub(super) fn push_value(&mut self, value: f64) {
        if !self.values.contains(&value) {
            self.values.push(value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.min.is_none() && self.max.is_none()
    }
}

/// Filter on a single column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFilter {
    Text(TextFilter),
    Number(NumberFilter),
}

/// Ordered, duplicate-free list of columns to return
#[derive(Debug, Clone, PartialEq)]
pub struct Projection(Vec<&'static ColumnDef>);

impl Projection {
    /// Every registry column in canonical order
    pub fn all() -> Self {
        Self(COLUMNS.iter().collect())
    }

    pub(super) fn from_columns(columns: Vec<&'static ColumnDef>) -> Self {
        if columns.is_empty() {
            Self::all()
        } else {
            Self(columns)
        }
    }

    pub fn columns(&self) -> &[&'static ColumnDef] {
        &self.0
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|c| c.name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::all()
    }
}

/// Page size limits from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub default_limit: u64,
    pub max_limit: u64,
}

/// Validated data query
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRequest {
    /// Active column filters in registry order
    pub(super) filters: Vec<(&'static ColumnDef, ColumnFilter)>,
    pub projection: Projection,
    pub limit: u64,
    pub offset: u64,
    pub format: OutputFormat,
}

impl FilterRequest {
    pub fn filters(&self) -> &[(&'static ColumnDef, ColumnFilter)] {
        &self.filters
    }

    /// Filter on the named column, if any
    pub fn filter(&self, name: &str) -> Option<&ColumnFilter> {
        self.filters
            .iter()
            .find(|(c, _)| c.name == name)
            .map(|(_, f)| f)
    }
}
