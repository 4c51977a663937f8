//! # API Error Types
//!
//! Maps store, media and export failures to HTTP status codes with a JSON
//! body `{ "error": { "code", "message", "details"? } }`. Internal error
//! details are logged and never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use parsa_export::ExportError;
use parsa_schema::SchemaError;
use parsa_store::{MediaError, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable code, e.g. `NOT_FOUND`, `INVALID_CONTENT`.
    pub code: String,
    pub message: String,
    /// Present for invalid content: `{ "errors": [...] }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    /// Request-level rule broken, e.g. a disallowed upload type (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Content failed the schema; carries one message per violation (422).
    #[error("content failed validation")]
    InvalidContent(Vec<String>),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// Revision precondition failed (409).
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Logged, never returned to the client (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::InvalidContent(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_CONTENT"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidContent(errors) => Some(serde_json::json!({ "errors": errors })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound("site content has not been created".to_string()),
            StoreError::ProjectNotFound { id } => Self::NotFound(format!("project '{id}'")),
            StoreError::Validation(report) => Self::InvalidContent(report.messages()),
            StoreError::StaleRevision { .. } => Self::Conflict(err.to_string()),
            StoreError::Schema(schema) => schema.into(),
            StoreError::Read { .. } | StoreError::Parse { .. } | StoreError::Write { .. } => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::Parse(_) | SchemaError::NotAnObject { .. } => {
                Self::BadRequest(err.to_string())
            }
            SchemaError::Compile { .. } | SchemaError::Io { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::UnsupportedType { .. } | MediaError::Empty => {
                Self::Validation(err.to_string())
            }
            MediaError::TooLarge { .. } => Self::PayloadTooLarge(err.to_string()),
            MediaError::Write { .. } => Self::Internal(err.to_string()),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Validation { errors } => Self::InvalidContent(errors),
            other => Self::Internal(other.to_string()),
        }
    }
}
