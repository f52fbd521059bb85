//! Query parameter parsing
//!
//! Turns the raw `(key, value)` pairs of a data request into a validated
//! [`FilterRequest`]. Every key is checked against the schema registry before
//! anything reaches the store.

use std::collections::BTreeMap;

use crate::data::schema::{self, ColumnDef, ColumnType, WILDCARD};
use crate::utils::string::parse_string_array;

use super::types::{
    ColumnFilter, FilterError, FilterRequest, NumberFilter, OutputFormat, Projection,
    QueryLimits, TextFilter,
};

const PARAM_FORMAT: &str = "format";
const PARAM_COLUMNS: &str = "columns";
const PARAM_LIMIT: &str = "limit";
const PARAM_OFFSET: &str = "offset";

/// Parse decoded query parameters into a filter request
///
/// Parameters are processed in the order given. Repeated text keys build an
/// OR-set; `format`, `limit`, `offset` and range bounds may appear once.
pub fn parse_filter_request(
    params: &[(String, String)],
    limits: &QueryLimits,
) -> Result<FilterRequest, FilterError> {
    let mut text: BTreeMap<usize, TextFilter> = BTreeMap::new();
    let mut numbers: BTreeMap<usize, NumberFilter> = BTreeMap::new();
    let mut projection: Vec<&'static ColumnDef> = Vec::new();
    let mut format: Option<OutputFormat> = None;
    let mut limit: Option<u64> = None;
    let mut offset: Option<u64> = None;

    for (key, value) in params {
        match key.as_str() {
            PARAM_FORMAT => {
                ensure_once(key, format.is_some())?;
                format = Some(OutputFormat::parse(value)?);
            }
            PARAM_LIMIT => {
                ensure_once(key, limit.is_some())?;
                limit = Some(parse_integer(key, value)?);
            }
            PARAM_OFFSET => {
                ensure_once(key, offset.is_some())?;
                offset = Some(parse_integer(key, value)?);
            }
            PARAM_COLUMNS => {
                for name in parse_string_array(value) {
                    let col = schema::column(&name)
                        .ok_or(FilterError::UnknownColumn { key: name.clone() })?;
                    if !projection.iter().any(|c| c.name == col.name) {
                        projection.push(col);
                    }
                }
            }
            _ => {
                if let Some(col) = schema::column(key) {
                    let Some(pos) = schema::position(col.name) else {
                        continue;
                    };
                    match col.kind {
                        ColumnType::Text => add_text_value(&mut text, pos, col, value),
                        ColumnType::Number => {
                            if !value.trim().is_empty() {
                                let n = parse_number(key, value)?;
                                numbers.entry(pos).or_default().push_value(n);
                            }
                        }
                    }
                } else if let Some((col, is_min)) = schema::range_bound(key) {
                    let Some(pos) = schema::position(col.name) else {
                        continue;
                    };
                    let n = parse_number(key, value)?;
                    let filter = numbers.entry(pos).or_default();
                    let bound = if is_min {
                        &mut filter.min
                    } else {
                        &mut filter.max
                    };
                    ensure_once(key, bound.is_some())?;
                    *bound = Some(n);
                } else {
                    return Err(FilterError::UnknownColumn { key: key.clone() });
                }
            }
        }
    }

    let limit = limit.unwrap_or(limits.default_limit);
    if limit > limits.max_limit {
        return Err(FilterError::LimitTooLarge {
            limit,
            max: limits.max_limit,
        });
    }

    let mut merged: BTreeMap<usize, ColumnFilter> = BTreeMap::new();
    merged.extend(
        text.into_iter()
            .filter(|(_, f)| !f.is_empty())
            .map(|(pos, f)| (pos, ColumnFilter::Text(f))),
    );
    merged.extend(
        numbers
            .into_iter()
            .filter(|(_, f)| !f.is_empty())
            .map(|(pos, f)| (pos, ColumnFilter::Number(f))),
    );

    let filters = merged
        .into_iter()
        .map(|(pos, f)| (&schema::COLUMNS[pos], f))
        .collect();

    Ok(FilterRequest {
        filters,
        projection: Projection::from_columns(projection),
        limit,
        offset: offset.unwrap_or(0),
        format: format.unwrap_or_default(),
    })
}

fn add_text_value(
    text: &mut BTreeMap<usize, TextFilter>,
    pos: usize,
    col: &ColumnDef,
    value: &str,
) {
    // An empty value never narrows the result
    if value.trim().is_empty() {
        return;
    }
    let filter = text.entry(pos).or_default();
    if col.wildcard && value.contains(WILDCARD) {
        filter.push_pattern(value);
    } else {
        filter.push_value(value);
    }
}

fn ensure_once(key: &str, already_set: bool) -> Result<(), FilterError> {
    if already_set {
        return Err(FilterError::DuplicateParameter {
            key: key.to_string(),
        });
    }
    Ok(())
}

fn parse_number(key: &str, value: &str) -> Result<f64, FilterError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FilterError::BadNumericValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn parse_integer(key: &str, value: &str) -> Result<u64, FilterError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n <= i64::MAX as u64)
        .ok_or_else(|| FilterError::BadInteger {
            key: key.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: QueryLimits = QueryLimits {
        default_limit: 100,
        max_limit: 1000,
    };

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn parse(items: &[(&str, &str)]) -> Result<FilterRequest, FilterError> {
        parse_filter_request(&pairs(items), &LIMITS)
    }

    #[test]
    fn empty_request_uses_defaults() {
        let req = parse(&[]).unwrap();
        assert!(req.filters().is_empty());
        assert_eq!(req.limit, 100);
        assert_eq!(req.offset, 0);
        assert_eq!(req.format, OutputFormat::Json);
        assert_eq!(req.projection, Projection::all());
    }

    #[test]
    fn repeated_text_keys_accumulate() {
        let req = parse(&[
            ("organism", "Homo sapiens"),
            ("organism", "Mus musculus"),
            ("organism", "homo sapiens"),
        ])
        .unwrap();
        let Some(ColumnFilter::Text(f)) = req.filter("organism") else {
            panic!("expected text filter");
        };
        assert_eq!(f.values, vec!["Homo sapiens", "Mus musculus"]);
    }

    #[test]
    fn ec_wildcards_become_patterns() {
        let req = parse(&[("ec", "1.1.1.%"), ("ec", "2.7.1.1")]).unwrap();
        let Some(ColumnFilter::Text(f)) = req.filter("ec") else {
            panic!("expected text filter");
        };
        assert_eq!(f.values, vec!["2.7.1.1"]);
        assert_eq!(f.patterns, vec!["1.1.1.%"]);
    }

    #[test]
    fn percent_outside_ec_is_literal() {
        let req = parse(&[("substrate", "50% glucose")]).unwrap();
        let Some(ColumnFilter::Text(f)) = req.filter("substrate") else {
            panic!("expected text filter");
        };
        assert_eq!(f.values, vec!["50% glucose"]);
        assert!(f.patterns.is_empty());
    }

    #[test]
    fn empty_values_add_no_filter() {
        let req = parse(&[("organism", ""), ("ph", " ")]).unwrap();
        assert!(req.filters().is_empty());
    }

    #[test]
    fn range_bounds_parse() {
        let req = parse(&[("temperature_min", "25"), ("temperature_max", "37.5")]).unwrap();
        let Some(ColumnFilter::Number(f)) = req.filter("temperature") else {
            panic!("expected number filter");
        };
        assert_eq!(f.min, Some(25.0));
        assert_eq!(f.max, Some(37.5));
        assert!(f.values.is_empty());
    }

    #[test]
    fn numeric_equality_set() {
        let req = parse(&[("kcat_pubmedid", "123"), ("kcat_pubmedid", "456")]).unwrap();
        let Some(ColumnFilter::Number(f)) = req.filter("kcat_pubmedid") else {
            panic!("expected number filter");
        };
        assert_eq!(f.values, vec![123.0, 456.0]);
    }

    #[test]
    fn bad_numeric_values_are_rejected() {
        for value in ["abc", "", "NaN", "inf"] {
            let err = parse(&[("ph_min", value)]).unwrap_err();
            assert_eq!(
                err,
                FilterError::BadNumericValue {
                    key: "ph_min".into(),
                    value: value.into()
                }
            );
        }
        assert_eq!(parse(&[("ph", "seven")]).unwrap_err().code(), "BAD_NUMERIC_VALUE");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_eq!(
            parse(&[("bogus", "x")]).unwrap_err(),
            FilterError::UnknownColumn { key: "bogus".into() }
        );
        // Text columns have no range form
        assert_eq!(
            parse(&[("organism_min", "1")]).unwrap_err().code(),
            "UNKNOWN_COLUMN"
        );
        // Column names are case-sensitive
        assert_eq!(parse(&[("Organism", "x")]).unwrap_err().code(), "UNKNOWN_COLUMN");
    }

    #[test]
    fn columns_projection_in_request_order() {
        let req = parse(&[("columns", "organism,ec"), ("columns", "ph"), ("columns", "ec")])
            .unwrap();
        let names: Vec<_> = req.projection.names().collect();
        assert_eq!(names, vec!["organism", "ec", "ph"]);
    }

    #[test]
    fn columns_projection_rejects_unknown() {
        assert_eq!(
            parse(&[("columns", "ec,nope")]).unwrap_err(),
            FilterError::UnknownColumn { key: "nope".into() }
        );
    }

    #[test]
    fn limit_and_offset() {
        let req = parse(&[("limit", "10"), ("offset", "30")]).unwrap();
        assert_eq!(req.limit, 10);
        assert_eq!(req.offset, 30);

        let req = parse(&[("limit", "0")]).unwrap();
        assert_eq!(req.limit, 0);

        let req = parse(&[("limit", "1000")]).unwrap();
        assert_eq!(req.limit, 1000);
    }

    #[test]
    fn limit_above_ceiling_is_rejected() {
        assert_eq!(
            parse(&[("limit", "1001")]).unwrap_err(),
            FilterError::LimitTooLarge {
                limit: 1001,
                max: 1000
            }
        );
    }

    #[test]
    fn bad_integers_are_rejected() {
        for (key, value) in [("limit", "-1"), ("offset", "1.5"), ("offset", "x")] {
            assert_eq!(parse(&[(key, value)]).unwrap_err().code(), "BAD_INTEGER");
        }
        assert_eq!(
            parse(&[("offset", "9223372036854775808")]).unwrap_err().code(),
            "BAD_INTEGER"
        );
    }

    #[test]
    fn duplicate_control_parameters_are_rejected() {
        for key in ["format", "limit", "offset"] {
            let value = if key == "format" { "json" } else { "1" };
            assert_eq!(
                parse(&[(key, value), (key, value)]).unwrap_err(),
                FilterError::DuplicateParameter { key: key.into() }
            );
        }
        assert_eq!(
            parse(&[("ph_min", "1"), ("ph_min", "2")]).unwrap_err().code(),
            "DUPLICATE_PARAMETER"
        );
    }

    #[test]
    fn format_is_case_insensitive() {
        assert_eq!(parse(&[("format", "CSV")]).unwrap().format, OutputFormat::Csv);
        assert_eq!(parse(&[("format", "xml")]).unwrap_err().code(), "INVALID_FORMAT");
    }

    #[test]
    fn filters_are_kept_in_registry_order() {
        let req = parse(&[("temperature_min", "20"), ("organism", "x"), ("ec", "1.%")]).unwrap();
        let names: Vec<_> = req.filters().iter().map(|(c, _)| c.name).collect();
        assert_eq!(names, vec!["ec", "organism", "temperature"]);
    }

    #[test]
    fn parsing_is_deterministic() {
        let items = [("organism", "a"), ("ph_max", "8"), ("columns", "ec")];
        assert_eq!(parse(&items).unwrap(), parse(&items).unwrap());
    }
}
