//! Error types for the prompt server

use std::path::PathBuf;
use thiserror::Error;

/// Prompt server error type
#[derive(Error, Debug)]
pub enum Error {
    /// Document root is missing or is not a directory
    #[error("Prompts directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Document root exists but holds no matching documents
    #[error("No markdown files found in {}", .0.display())]
    EmptyCorpus(PathBuf),

    /// No document name contains the requested fragment
    #[error("No prompt found with the name '{0}'")]
    NoMatch(String),

    /// A single document could not be read
    #[error("Failed to read {}: {reason}", path.display())]
    DocumentRead {
        /// Path of the unreadable document
        path: PathBuf,
        /// Human-readable cause
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for prompt server operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::ConfigError(format!("Invalid glob pattern: {}", err))
    }
}

impl Error {
    /// Build a read error for `path` from any displayable cause
    pub fn document_read(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Error::DocumentRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoMatch("deploy".to_string());
        assert_eq!(err.to_string(), "No prompt found with the name 'deploy'");
    }

    #[test]
    fn test_document_read_display() {
        let err = Error::document_read("a/b.md", "stream did not contain valid UTF-8");
        assert_eq!(
            err.to_string(),
            "Failed to read a/b.md: stream did not contain valid UTF-8"
        );
    }

    #[test]
    fn test_pattern_error_is_config_error() {
        let err: Error = glob::Pattern::new("[").unwrap_err().into();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
