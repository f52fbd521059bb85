//! Result serialization for the data endpoint
//!
//! A [`QueryResult`] leaves here either as a JSON page object whose row keys
//! follow the projection order, or as CSV text with a header line.

use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::data::filters::Projection;
use crate::data::types::{CellValue, QueryResult, Row};

/// Largest integer an f64 holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// JSON body of `GET /api/v1/data`
#[derive(Debug, Serialize, ToSchema)]
pub struct DataPage {
    /// Rows matching the filters, independent of limit and offset
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
    /// Offset of the following page, absent on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<u64>,
    /// Offset of the preceding page, absent on the first page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_offset: Option<u64>,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Map<String, Value>>,
}

impl DataPage {
    pub fn new(result: QueryResult, projection: &Projection, limit: u64, offset: u64) -> Self {
        let (next_offset, previous_offset) = page_offsets(result.total, limit, offset);
        let data = result
            .rows
            .into_iter()
            .map(|row| row_to_object(projection, row))
            .collect();
        Self {
            total: result.total,
            offset,
            limit,
            next_offset,
            previous_offset,
            data,
        }
    }
}

/// Offsets of the neighbouring pages, `(next, previous)`
pub fn page_offsets(total: u64, limit: u64, offset: u64) -> (Option<u64>, Option<u64>) {
    let next = offset
        .checked_add(limit)
        .filter(|&next| limit > 0 && next < total);
    let previous = (offset > 0).then(|| offset.saturating_sub(limit).min(total.saturating_sub(1)));
    (next, previous)
}

fn row_to_object(projection: &Projection, row: Row) -> Map<String, Value> {
    projection
        .names()
        .zip(row)
        .map(|(name, cell)| (name.to_string(), cell_to_json(cell)))
        .collect()
}

fn cell_to_json(cell: CellValue) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Text(s) => Value::String(s),
        // Whole numbers such as PubMed ids read better without a trailing .0
        CellValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
            Value::from(n as i64)
        }
        CellValue::Number(n) => serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null),
    }
}

/// Render a header line plus one CRLF-terminated line per row
///
/// Fields are quoted only when they hold a delimiter, quote or line break.
pub fn to_csv(projection: &Projection, rows: &[Row]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(projection.names())?;
    for row in rows {
        writer.write_record(row.iter().map(csv_field))?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

fn csv_field(cell: &CellValue) -> String {
    match cell {
        CellValue::Null => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) if n.is_finite() => n.to_string(),
        CellValue::Number(_) => String::new(),
    }
}
