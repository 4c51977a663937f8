//! Error types for the content and media stores.

use std::path::PathBuf;

use parsa_schema::{SchemaError, ValidationReport};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("content file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read content file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("content file '{}' is not a valid content document: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The candidate document broke the schema; nothing was written.
    #[error("content failed validation with {count} violation(s):\n{0}", count = .0.len())]
    Validation(ValidationReport),

    #[error("failed to write content file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("project not found: {id}")]
    ProjectNotFound { id: String },

    /// The caller's revision precondition no longer holds.
    #[error("content revision mismatch: expected {expected}, current {}", .actual.as_deref().unwrap_or("<none>"))]
    StaleRevision {
        expected: String,
        actual: Option<String>,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl StoreError {
    /// Violation messages, when this is a validation failure.
    pub fn violation_messages(&self) -> Vec<String> {
        match self {
            Self::Validation(report) => report.messages(),
            _ => Vec::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("unsupported media type '{content_type}' (allowed: {allowed})")]
    UnsupportedType {
        content_type: String,
        allowed: String,
    },

    #[error("file of {size} bytes exceeds the {limit}-byte upload limit")]
    TooLarge { size: usize, limit: usize },

    #[error("uploaded file is empty")]
    Empty,

    #[error("failed to write media file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsa_schema::Violation;

    #[test]
    fn validation_error_lists_violations() {
        let report = ValidationReport::from_violations(vec![Violation {
            path: "/hero".to_string(),
            schema_path: "/properties/hero/required".to_string(),
            message: "\"title\" is a required property".to_string(),
        }]);
        let err = StoreError::Validation(report);
        let text = err.to_string();
        assert!(text.contains("1 violation(s)"));
        assert!(text.contains("/hero: \"title\" is a required property"));
        assert_eq!(err.violation_messages().len(), 1);
    }

    #[test]
    fn stale_revision_without_current_file() {
        let err = StoreError::StaleRevision {
            expected: "abc".to_string(),
            actual: None,
        };
        assert!(err.to_string().contains("<none>"));
        assert!(err.violation_messages().is_empty());
    }

    #[test]
    fn media_error_display() {
        let err = MediaError::TooLarge {
            size: 6,
            limit: 5,
        };
        assert_eq!(err.to_string(), "file of 6 bytes exceeds the 5-byte upload limit");
    }
}
