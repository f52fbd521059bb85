//! Domain logic for the kinetics API
//!
//! - `export` - JSON page and CSV rendering of query results
//! - `metadata` - Distinct value listing for text columns

pub mod export;
pub mod metadata;

pub use export::{DataPage, page_offsets, to_csv};
pub use metadata::{ColumnValues, MetadataError, resolve_column_values};
