//! File utility functions

use std::path::PathBuf;

/// Expand a user-supplied path to an absolute path.
///
/// `~` and `~/...` resolve against the home directory; relative paths
/// (including bare names) resolve against the current working directory.
/// Absolute paths pass through unchanged.
///
/// ```text
/// expand_path("~/.aipm")    // -> /home/user/.aipm
/// expand_path("./app.db")   // -> /current/dir/./app.db
/// expand_path("/var/aipm")  // -> /var/aipm
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    } else {
        PathBuf::from(path)
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
    fn test_expand_path_absolute_unchanged() {
        assert_eq!(expand_path("/var/lib/aipm"), PathBuf::from("/var/lib/aipm"));
    }

    #[test]
    fn test_expand_path_relative_becomes_absolute() {
        let result = expand_path("./app.db");
        assert!(result.is_absolute());
        assert!(result.ends_with("app.db"));

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("aipm.db"), cwd.join("aipm.db"));
    }

    #[test]
    fn test_expand_path_tilde() {
        let result = expand_path("~/.aipm");
        assert!(!result.to_string_lossy().contains('~'));
        assert!(result.ends_with(".aipm"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
        }
    }

    #[test]
    fn test_expand_path_trims_and_handles_empty() {
        assert_eq!(expand_path("  /tmp/aipm  "), PathBuf::from("/tmp/aipm"));
        assert!(expand_path("").is_absolute());
    }
}
