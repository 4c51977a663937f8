//! Error types for export and sync.

use std::path::PathBuf;

use parsa_schema::SchemaError;
use thiserror::Error;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum ExportError {
    /// The document broke the schema; no archive was produced.
    #[error("content validation failed with {} error(s)", .errors.len())]
    Validation { errors: Vec<String> },

    #[error("failed to serialize content: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to build archive: {0}")]
    Archive(#[from] ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ExportError {
    /// User-facing error list: the violations for a validation failure,
    /// otherwise a single `Export failed: ...` entry.
    pub fn errors(&self) -> Vec<String> {
        match self {
            Self::Validation { errors } => errors.clone(),
            other => vec![format!("Export failed: {other}")],
        }
    }
}

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("cannot read archive '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("not a valid content archive: {0}")]
    InvalidArchive(#[from] ZipError),

    #[error("archive contains neither {json} nor {source_entry}")]
    MissingContent {
        json: &'static str,
        source_entry: &'static str,
    },

    /// Validation was requested and the archived content failed it.
    #[error("archived content rejected:\n{}", .errors.join("\n"))]
    ContentRejected { errors: Vec<String> },

    #[error("failed to write content file '{}': {source}", .path.display())]
    ContentWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
