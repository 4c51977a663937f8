//! # Content Store
//!
//! Owns the persisted content file. Reads are lock-free: the file is only
//! ever replaced by rename, so a reader sees either the old or the new
//! document in full. Writes take the store's mutex for the whole
//! read-check-validate-write cycle, so two writers in one process cannot
//! interleave.
//!
//! ## Revisions
//!
//! The revision of a persisted state is the lowercase SHA-256 hex of the
//! file bytes. The `*_if_match` operations refuse to write when the current
//! revision differs from the caller's, which is how the HTTP layer
//! implements `If-Match`. Without a precondition, the last writer wins.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use parsa_core::fs::write_atomic;
use parsa_core::{ContentDocument, ContentPatch, Project, ProjectCategory, SiteConfig};
use parsa_schema::{ContentValidator, ValidationReport, Violation};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::StoreError;

/// SHA-256 revision of persisted content bytes.
pub fn revision_of(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[derive(Debug)]
pub struct ContentStore {
    path: PathBuf,
    validator: Arc<ContentValidator>,
    write_lock: Mutex<()>,
}

impl ContentStore {
    pub fn new(path: impl Into<PathBuf>, validator: Arc<ContentValidator>) -> Self {
        Self {
            path: path.into(),
            validator,
            write_lock: Mutex::new(()),
        }
    }

    /// Store at the configured content path, validating against the
    /// persisted schema when present and the embedded one otherwise.
    pub fn from_config(config: &SiteConfig) -> Result<Self, StoreError> {
        let validator = ContentValidator::load_or_default(&config.schema_file())?;
        Ok(Self::new(config.content_file(), Arc::new(validator)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn validator(&self) -> &Arc<ContentValidator> {
        &self.validator
    }

    /// Read and parse the current document.
    pub fn load(&self) -> Result<ContentDocument, StoreError> {
        self.load_with_revision().map(|(doc, _)| doc)
    }

    /// Current document together with its revision, from a single read.
    pub fn load_with_revision(&self) -> Result<(ContentDocument, String), StoreError> {
        let bytes = self.read_bytes()?;
        let document = serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok((document, revision_of(&bytes)))
    }

    /// Revision of the persisted file.
    pub fn revision(&self) -> Result<String, StoreError> {
        self.read_bytes().map(|bytes| revision_of(&bytes))
    }

    /// Validate and persist `document`, returning the new revision.
    pub fn replace(&self, document: &ContentDocument) -> Result<String, StoreError> {
        let _guard = self.write_lock.lock();
        self.validate_and_write(document)
    }

    /// [`ContentStore::replace`] guarded by a revision precondition.
    pub fn replace_if_match(
        &self,
        document: &ContentDocument,
        expected: &str,
    ) -> Result<String, StoreError> {
        let _guard = self.write_lock.lock();
        self.check_revision(expected)?;
        self.validate_and_write(document)
    }

    /// Replace from an untyped body. Schema violations are reported with
    /// their JSON paths before any typed conversion is attempted.
    pub fn replace_value(&self, value: &Value, if_match: Option<&str>) -> Result<String, StoreError> {
        let report = self.validator.validate(value)?;
        if !report.is_valid() {
            return Err(StoreError::Validation(report));
        }
        let document: ContentDocument = serde_json::from_value(value.clone()).map_err(|e| {
            StoreError::Validation(ValidationReport::from_violations(vec![Violation {
                path: String::new(),
                schema_path: String::new(),
                message: e.to_string(),
            }]))
        })?;

        let _guard = self.write_lock.lock();
        if let Some(expected) = if_match {
            self.check_revision(expected)?;
        }
        self.write(&document)
    }

    /// Merge `patch` over the current document, validate the merged result,
    /// persist it, and return it with the revision that write produced.
    ///
    /// The whole merged document is validated, so pre-existing invalid data
    /// in an untouched section still rejects the patch.
    pub fn patch(&self, patch: ContentPatch) -> Result<(ContentDocument, String), StoreError> {
        let _guard = self.write_lock.lock();
        self.patch_locked(patch)
    }

    /// [`ContentStore::patch`] guarded by a revision precondition.
    pub fn patch_if_match(
        &self,
        patch: ContentPatch,
        expected: &str,
    ) -> Result<(ContentDocument, String), StoreError> {
        let _guard = self.write_lock.lock();
        self.check_revision(expected)?;
        self.patch_locked(patch)
    }

    /// Find a project by id.
    pub fn get_project(&self, id: &str) -> Result<Project, StoreError> {
        self.load()?
            .project(id)
            .cloned()
            .ok_or_else(|| StoreError::ProjectNotFound { id: id.to_string() })
    }

    /// Projects in document order, optionally filtered by category.
    pub fn projects_by_category(
        &self,
        category: Option<ProjectCategory>,
    ) -> Result<Vec<Project>, StoreError> {
        let document = self.load()?;
        Ok(document.projects_in(category).into_iter().cloned().collect())
    }

    /// Distinct categories in first-seen order.
    pub fn project_categories(&self) -> Result<Vec<ProjectCategory>, StoreError> {
        Ok(self.load()?.project_categories())
    }

    fn patch_locked(
        &self,
        patch: ContentPatch,
    ) -> Result<(ContentDocument, String), StoreError> {
        let sections = patch.sections();
        let merged = patch.apply(self.load()?);
        let revision = self.validate_and_write(&merged)?;
        tracing::info!(sections = ?sections, revision = %revision, "content patched");
        Ok((merged, revision))
    }

    fn check_revision(&self, expected: &str) -> Result<(), StoreError> {
        let actual = match self.revision() {
            Ok(rev) => Some(rev),
            Err(StoreError::NotFound { .. }) => None,
            Err(e) => return Err(e),
        };
        if actual.as_deref() == Some(expected) {
            Ok(())
        } else {
            tracing::warn!(expected, actual = ?actual, "rejecting write on stale revision");
            Err(StoreError::StaleRevision {
                expected: expected.to_string(),
                actual,
            })
        }
    }

    fn validate_and_write(&self, document: &ContentDocument) -> Result<String, StoreError> {
        let report = self.validator.validate_document(document)?;
        if !report.is_valid() {
            tracing::warn!(violations = report.len(), "rejecting invalid content");
            return Err(StoreError::Validation(report));
        }
        self.write(document)
    }

    fn write(&self, document: &ContentDocument) -> Result<String, StoreError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;
        write_atomic(&self.path, &bytes).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        let revision = revision_of(&bytes);
        tracing::info!(path = %self.path.display(), revision = %revision, "content written");
        Ok(revision)
    }

    fn read_bytes(&self) -> Result<Vec<u8>, StoreError> {
        std::fs::read(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                StoreError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }
}
