//! Query filter system
//!
//! Turns the open-ended query parameters of a data request into a validated
//! [`FilterRequest`] and then into a [`Predicate`] tree that renders to
//! parameterized SQL for any supported dialect.
//!
//! ## Usage
//!
//! ```no_run
//! use oed_server::data::filters::{QueryLimits, build_predicate, parse_filter_request};
//! use oed_server::data::sql::{PostgresDialect, SqlParams};
//!
//! let limits = QueryLimits { default_limit: 100, max_limit: 10_000 };
//! let query = vec![("organism".to_string(), "Homo sapiens".to_string())];
//! let request = parse_filter_request(&query, &limits).unwrap();
//! let mut params = SqlParams::default();
//! if let Some(predicate) = build_predicate(&request) {
//!     let where_clause = predicate.to_sql(&PostgresDialect, &mut params);
//!     assert!(where_clause.contains("$1"));
//! }
//! ```

mod builder;
mod parser;
mod types;

pub use builder::{CompareOp, Predicate, build_predicate};
pub use parser::parse_filter_request;
pub use types::{
    ColumnFilter, FilterError, FilterRequest, NumberFilter, OutputFormat, Projection, QueryLimits,
    TextFilter,
};
