//! String utility functions

use std::cmp::Ordering;

/// Order two strings as if both were lowercased with the Unicode case mapping
///
/// Backs the SQLite text collation, so filter values that compare equal here
/// match the same stored rows.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    cmp_ignore_case(a, b).is_eq()
}

/// Parse a list parameter that may be a JSON array or comma-separated values
///
/// `["ec", "organism"]` and `ec, organism` both yield `["ec", "organism"]`.
/// Malformed JSON falls back to comma splitting. Empty entries are dropped.
pub fn parse_string_array(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if trimmed.starts_with('[')
        && let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed)
    {
        return items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    trimmed
        .trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(|s| s.trim().trim_matches('"').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_array_csv() {
        assert_eq!(parse_string_array("ec, organism"), vec!["ec", "organism"]);
        assert_eq!(parse_string_array("ec,,km_value,"), vec!["ec", "km_value"]);
    }

    #[test]
    fn test_parse_string_array_json() {
        assert_eq!(
            parse_string_array(r#"["ec", "substrate"]"#),
            vec!["ec", "substrate"]
        );
    }

    #[test]
    fn test_parse_string_array_malformed_json() {
        assert_eq!(parse_string_array("[ec, ph]"), vec!["ec", "ph"]);
    }

    #[test]
    fn test_parse_string_array_blank() {
        assert!(parse_string_array("").is_empty());
        assert!(parse_string_array("   ").is_empty());
    }

    #[test]
    fn test_ignore_case_folds_beyond_ascii() {
        assert!(eq_ignore_case("Éthanol", "éthanol"));
        assert!(eq_ignore_case("HOMO Sapiens", "homo sapiens"));
        assert!(!eq_ignore_case("ethanol", "éthanol"));
        assert_eq!(cmp_ignore_case("Ábc", "abd"), Ordering::Greater);
        assert_eq!(cmp_ignore_case("b", "A"), Ordering::Greater);
    }
}
