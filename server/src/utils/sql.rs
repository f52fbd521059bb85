//! SQL utility functions

/// Escape LIKE metacharacters except the `%` wildcard
///
/// For patterns where the caller's `%` is meant as "any sequence" while `_`
/// and `\` must match literally.
pub fn escape_like_keep_wildcard(s: &str) -> String {
    s.replace('\\', "\\\\").replace('_', "\\_")
}

/// Check that a table reference is a plain or schema-qualified identifier
///
/// Accepts `name` or `schema.name` where each part starts with a letter or
/// underscore followed by letters, digits or underscores.
pub fn is_valid_table_name(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_keep_wildcard() {
        assert_eq!(escape_like_keep_wildcard("1.1.%"), "1.1.%");
        assert_eq!(escape_like_keep_wildcard("a_b%"), "a\\_b%");
        assert_eq!(escape_like_keep_wildcard("a\\%"), "a\\\\%");
    }

    #[test]
    fn test_is_valid_table_name() {
        assert!(is_valid_table_name("oed_data"));
        assert!(is_valid_table_name("oed.oed_data"));
        assert!(is_valid_table_name("_t1"));
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("a.b.c"));
        assert!(!is_valid_table_name("1table"));
        assert!(!is_valid_table_name("oed_data; DROP TABLE x"));
        assert!(!is_valid_table_name("oed."));
    }
}
