/// Error types for the chapgrep library
use std::fmt;

/// Result type alias for chapgrep operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Main error type for chapgrep operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The source document could not be read
    SourceUnavailable {
        /// Path (or "-" for stdin) that was requested
        path: String,
        /// Underlying reason reported by the reader
        reason: String,
    },

    /// Keyword was empty or whitespace-only
    EmptyKeyword,
}

impl SearchError {
    /// Returns true if this error means the source text could not be loaded.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, SearchError::SourceUnavailable { .. })
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::SourceUnavailable { path, reason } => {
                write!(f, "Source unavailable: {}: {}", path, reason)
            }
            SearchError::EmptyKeyword => write!(f, "Keyword must not be empty"),
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_source_unavailable() {
        let err = SearchError::SourceUnavailable {
            path: "novel.txt".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Source unavailable: novel.txt: No such file or directory"
        );
        assert!(err.is_source_unavailable());
    }

    #[test]
    fn test_display_empty_keyword() {
        let err = SearchError::EmptyKeyword;
        assert_eq!(err.to_string(), "Keyword must not be empty");
        assert!(!err.is_source_unavailable());
    }
}
