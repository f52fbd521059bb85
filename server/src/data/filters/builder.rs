//! SQL predicate builder
//!
//! Builds a predicate tree from a [`FilterRequest`] and renders it to a
//! WHERE clause. Leaves carry typed values which are always bound as
//! parameters; only registry column names appear in the SQL text.

use crate::data::sql::{SqlDialect, SqlParams, SqlValue};
use crate::utils::sql::escape_like_keep_wildcard;

use super::types::{ColumnFilter, FilterRequest, NumberFilter, TextFilter};

/// Comparison operator for range bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gte,
    Lte,
}

impl CompareOp {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

/// Boolean filter expression over registry columns
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    /// Case-insensitive membership in a set of literals
    TextIn {
        column: &'static str,
        values: Vec<String>,
    },
    /// Case-insensitive match against a `%` pattern
    Like {
        column: &'static str,
        pattern: String,
    },
    NumberIn {
        column: &'static str,
        values: Vec<f64>,
    },
    Compare {
        column: &'static str,
        op: CompareOp,
        value: f64,
    },
}

impl Predicate {
    /// Render to SQL, pushing bound values onto `params` in placeholder order
    pub fn to_sql(&self, dialect: &dyn SqlDialect, params: &mut SqlParams) -> String {
        match self {
            Self::And(parts) => join(parts, " AND ", dialect, params),
            Self::Or(parts) => join(parts, " OR ", dialect, params),
            Self::TextIn { column, values } => {
                let marks: Vec<String> = values
                    .iter()
                    .map(|v| params.bind(dialect, SqlValue::Text(v.clone())))
                    .collect();
                dialect.text_in(column, &marks)
            }
            Self::Like { column, pattern } => {
                let escaped = escape_like_keep_wildcard(pattern);
                let p = params.bind(dialect, SqlValue::Text(escaped));
                format!("LOWER({}) LIKE LOWER({}) ESCAPE '\\'", column, p)
            }
            Self::NumberIn { column, values } => {
                let marks: Vec<String> = values
                    .iter()
                    .map(|v| params.bind(dialect, SqlValue::Number(*v)))
                    .collect();
                if marks.len() == 1 {
                    format!("{} = {}", column, marks[0])
                } else {
                    format!("{} IN ({})", column, marks.join(", "))
                }
            }
            Self::Compare { column, op, value } => {
                let p = params.bind(dialect, SqlValue::Number(*value));
                format!("{} {} {}", column, op.as_sql(), p)
            }
        }
    }
}

fn join(
    parts: &[Predicate],
    sep: &str,
    dialect: &dyn SqlDialect,
    params: &mut SqlParams,
) -> String {
    let rendered: Vec<String> = parts.iter().map(|p| p.to_sql(dialect, params)).collect();
    match rendered.len() {
        // Unreachable through build_predicate, but keep the SQL valid
        0 if sep == " AND " => "1=1".to_string(),
        0 => "1=0".to_string(),
        1 => rendered.into_iter().next().unwrap_or_default(),
        _ => format!("({})", rendered.join(sep)),
    }
}

/// Collapse a list of clauses: none, a single clause, or a combinator
fn combine(mut parts: Vec<Predicate>, make: fn(Vec<Predicate>) -> Predicate) -> Option<Predicate> {
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(make(parts)),
    }
}

fn text_predicate(column: &'static str, filter: &TextFilter) -> Option<Predicate> {
    let mut any_of = Vec::new();
    if !filter.values.is_empty() {
        any_of.push(Predicate::TextIn {
            column,
            values: filter.values.clone(),
        });
    }
    any_of.extend(filter.patterns.iter().map(|p| Predicate::Like {
        column,
        pattern: p.clone(),
    }));
    combine(any_of, Predicate::Or)
}

fn number_predicate(column: &'static str, filter: &NumberFilter) -> Option<Predicate> {
    let mut all_of = Vec::new();
    if !filter.values.is_empty() {
        all_of.push(Predicate::NumberIn {
            column,
            values: filter.values.clone(),
        });
    }
    if let Some(min) = filter.min {
        all_of.push(Predicate::Compare {
            column,
            op: CompareOp::Gte,
            value: min,
        });
    }
    if let Some(max) = filter.max {
        all_of.push(Predicate::Compare {
            column,
            op: CompareOp::Lte,
            value: max,
        });
    }
    combine(all_of, Predicate::And)
}

/// Build the predicate for a request
///
/// Column filters are AND-ed in registry order. Within a column, literal
/// values and patterns are OR-ed; a numeric equality set and its range bounds
/// are AND-ed. Returns `None` when nothing filters.
pub fn build_predicate(request: &FilterRequest) -> Option<Predicate> {
    let clauses = request
        .filters()
        .iter()
        .filter_map(|(col, filter)| match filter {
            ColumnFilter::Text(f) => text_predicate(col.name, f),
            ColumnFilter::Number(f) => number_predicate(col.name, f),
        })
        .collect();
    combine(clauses, Predicate::And)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::{QueryLimits, parse_filter_request};
    use crate::data::sql::{PostgresDialect, SqliteDialect};

    const LIMITS: QueryLimits = QueryLimits {
        default_limit: 100,
        max_limit: 1000,
    };

    fn build(items: &[(&str, &str)]) -> Option<Predicate> {
        let params: Vec<(String, String)> = items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let request = parse_filter_request(&params, &LIMITS).unwrap();
        build_predicate(&request)
    }

    fn render_pg(predicate: &Predicate) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        let sql = predicate.to_sql(&PostgresDialect, &mut params);
        (sql, params)
    }

    #[test]
    fn no_filters_no_predicate() {
        assert!(build(&[]).is_none());
        assert!(build(&[("limit", "5"), ("columns", "ec")]).is_none());
    }

    #[test]
    fn single_text_value() {
        let (sql, params) = render_pg(&build(&[("organism", "Homo sapiens")]).unwrap());
        assert_eq!(sql, "LOWER(organism) = LOWER($1)");
        assert_eq!(params.values, vec![SqlValue::Text("Homo sapiens".into())]);
    }

    #[test]
    fn text_or_set_and_range_combine() {
        let predicate = build(&[
            ("organism", "Homo sapiens"),
            ("organism", "Mus musculus"),
            ("temperature_min", "25"),
            ("temperature_max", "37"),
        ])
        .unwrap();
        let (sql, params) = render_pg(&predicate);
        assert_eq!(
            sql,
            "(LOWER(organism) IN (LOWER($1), LOWER($2)) AND (temperature >= $3 AND temperature <= $4))"
        );
        assert_eq!(
            params.values,
            vec![
                SqlValue::Text("Homo sapiens".into()),
                SqlValue::Text("Mus musculus".into()),
                SqlValue::Number(25.0),
                SqlValue::Number(37.0),
            ]
        );
    }

    #[test]
    fn ec_pattern_and_literal_are_or_ed() {
        let predicate = build(&[("ec", "1.1.1.%"), ("ec", "2.7.1.1")]).unwrap();
        let mut params = SqlParams::default();
        let sql = predicate.to_sql(&SqliteDialect, &mut params);
        assert_eq!(
            sql,
            "(ec COLLATE oed_nocase = ? OR LOWER(ec) LIKE LOWER(?) ESCAPE '\\')"
        );
        assert_eq!(
            params.values,
            vec![
                SqlValue::Text("2.7.1.1".into()),
                SqlValue::Text("1.1.1.%".into())
            ]
        );
    }

    #[test]
    fn like_pattern_escapes_underscore_and_backslash() {
        let predicate = Predicate::Like {
            column: "ec",
            pattern: "1_\\%".into(),
        };
        let (_, params) = render_pg(&predicate);
        assert_eq!(params.values, vec![SqlValue::Text("1\\_\\\\%".into())]);
    }

    #[test]
    fn numeric_equality_set() {
        let (sql, params) = render_pg(&build(&[("km_pubmedid", "1"), ("km_pubmedid", "2")]).unwrap());
        assert_eq!(sql, "km_pubmedid IN ($1, $2)");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn user_text_never_reaches_sql() {
        let hostile = "x' OR '1'='1";
        let (sql, params) = render_pg(&build(&[("substrate", hostile)]).unwrap());
        assert!(!sql.contains(hostile));
        assert_eq!(params.values, vec![SqlValue::Text(hostile.into())]);
    }

    #[test]
    fn rendering_is_deterministic() {
        let items = [("ph_min", "6"), ("ec", "3.%"), ("organism", "a")];
        assert_eq!(render_pg(&build(&items).unwrap()), render_pg(&build(&items).unwrap()));
    }
}
