//! # Content Validation
//!
//! Wraps a compiled `jsonschema` validator for the content schema and adds
//! the one rule JSON Schema cannot state: project ids must be unique within
//! the document.
//!
//! Violations carry the JSON Pointer of the offending value (`/hero` for a
//! missing `hero.title`, `/colorPalettes/0/colors/1` for a bad color), the
//! schema location that rejected it, and a human-readable message.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::Validator;
use parsa_core::ContentDocument;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The content schema shipped with this crate.
pub const CONTENT_SCHEMA: &str = include_str!("../schemas/content.schema.json");

/// Fatal validation failures. A document that merely breaks the schema is
/// not an error; it produces a [`ValidationReport`] with violations.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The input was not parseable JSON.
    #[error("content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input parsed, but the root is not an object.
    #[error("content root must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// The schema text itself is unusable.
    #[error("content schema could not be compiled: {reason}")]
    Compile { reason: String },

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A single violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer into the document; empty for the root.
    pub path: String,
    /// JSON Pointer into the schema.
    pub schema_path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Outcome of validating one document. Valid iff there are no violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// One `path: message` line per violation.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Compiled content schema.
///
/// Cheap to share behind an `Arc`; validation takes `&self`.
pub struct ContentValidator {
    source: String,
    validator: Validator,
}

impl fmt::Debug for ContentValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentValidator")
            .field("schema_len", &self.source.len())
            .finish_non_exhaustive()
    }
}

impl ContentValidator {
    /// Validator for the embedded [`CONTENT_SCHEMA`].
    pub fn new() -> Result<Self, SchemaError> {
        Self::from_schema_str(CONTENT_SCHEMA)
    }

    /// Compile a schema from its JSON text.
    pub fn from_schema_str(source: &str) -> Result<Self, SchemaError> {
        let schema: Value = serde_json::from_str(source).map_err(|e| SchemaError::Compile {
            reason: format!("schema is not valid JSON: {e}"),
        })?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft7);
        let validator = opts.build(&schema).map_err(|e| SchemaError::Compile {
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: source.to_string(),
            validator,
        })
    }

    /// Compile the schema stored at `path`.
    pub fn from_file(path: &Path) -> Result<Self, SchemaError> {
        let source = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_schema_str(&source)
    }

    /// The persisted schema when `path` exists, the embedded one otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, SchemaError> {
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading content schema from disk");
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "schema file absent, using embedded schema");
            Self::new()
        }
    }

    /// The exact schema text this validator was compiled from.
    pub fn schema_source(&self) -> &str {
        &self.source
    }

    /// Validate a parsed document.
    pub fn validate(&self, instance: &Value) -> Result<ValidationReport, SchemaError> {
        if !instance.is_object() {
            return Err(SchemaError::NotAnObject {
                found: json_type_name(instance),
            });
        }

        let mut violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();
        violations.extend(duplicate_project_ids(instance));

        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "content failed validation");
        }
        Ok(ValidationReport { violations })
    }

    /// Parse then validate JSON text.
    pub fn validate_str(&self, text: &str) -> Result<ValidationReport, SchemaError> {
        let instance: Value = serde_json::from_str(text)?;
        self.validate(&instance)
    }

    /// Validate a typed document. Shape is guaranteed by the type system;
    /// this catches format rules such as hex colors and unique ids.
    pub fn validate_document(
        &self,
        document: &ContentDocument,
    ) -> Result<ValidationReport, SchemaError> {
        let instance = serde_json::to_value(document)?;
        self.validate(&instance)
    }

    /// Read, parse and validate the content file at `path`.
    pub fn validate_file(&self, path: &Path) -> Result<ValidationReport, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.validate_str(&text)
    }
}

fn duplicate_project_ids(instance: &Value) -> Vec<Violation> {
    let Some(projects) = instance.get("projects").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    projects
        .iter()
        .enumerate()
        .filter_map(|(i, project)| {
            let id = project.get("id")?.as_str()?;
            if seen.insert(id) {
                None
            } else {
                Some(Violation {
                    path: format!("/projects/{i}/id"),
                    schema_path: "/properties/projects/items/properties/id".to_string(),
                    message: format!("duplicate project id \"{id}\""),
                })
            }
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
