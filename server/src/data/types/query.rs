//! Query plan and result types

use serde::Serialize;

use crate::data::filters::{FilterRequest, Predicate, Projection, build_predicate};

/// Everything the store needs to run one data query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub predicate: Option<Predicate>,
    pub projection: Projection,
    pub limit: u64,
    pub offset: u64,
}

impl QueryPlan {
    pub fn from_request(request: &FilterRequest) -> Self {
        Self {
            predicate: build_predicate(request),
            projection: request.projection.clone(),
            limit: request.limit,
            offset: request.offset,
        }
    }
}

/// A single cell of a result row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Text(String),
    Number(f64),
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Number)
    }
}

/// Row values aligned with the plan's projection
pub type Row = Vec<CellValue>;

/// Total match count plus one page of rows
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Rows matching the predicate, independent of limit/offset
    pub total: u64,
    pub rows: Vec<Row>,
}
