//! File utility functions

use std::path::PathBuf;

/// Expand `~` and make relative paths absolute against the working directory
///
/// Used for the SQLite database path and the import/config file arguments.
/// Absolute paths pass through unchanged. An empty string yields the
/// current directory.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();
    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => dirs::home_dir()
            .map(|home| home.join(&rest[1..]))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_is_unchanged() {
        assert_eq!(expand_path("/var/lib/oed.db"), PathBuf::from("/var/lib/oed.db"));
        assert_eq!(expand_path("  /var/lib/oed.db  "), PathBuf::from("/var/lib/oed.db"));
    }

    #[test]
    fn relative_path_joins_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("oed.db"), cwd.join("oed.db"));
        assert_eq!(expand_path("./data/oed.db"), cwd.join("./data/oed.db"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let result = expand_path("~/.oed/oed.db");
        assert!(result.is_absolute());
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".oed/oed.db"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
        }
    }

    #[test]
    fn tilde_inside_name_is_literal() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("~backup"), cwd.join("~backup"));
    }

    #[test]
    fn empty_is_cwd() {
        assert!(expand_path("").is_absolute());
    }
}
