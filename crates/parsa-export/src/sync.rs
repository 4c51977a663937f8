//! # Archive Sync
//!
//! Replays an exported archive onto a [`SyncTarget`]: the content entry
//! overwrites the target content file, and every file under
//! `public/images/` in the archive is written beneath the target media
//! root at the same relative path. Nothing in the target is ever deleted.
//!
//! Failure to read the archive or to write the content file aborts the
//! sync. A media entry that cannot be written, or whose name would leave
//! the media root, is logged and recorded in the [`SyncReport`]; the
//! remaining entries are still processed.

use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};

use parsa_core::fs::write_atomic;
use parsa_core::{layout, SiteConfig};
use parsa_schema::ContentValidator;
use serde::Serialize;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::SyncError;
use crate::source;

/// Where a sync writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    pub content_file: PathBuf,
    pub media_root: PathBuf,
}

impl SyncTarget {
    /// The standard layout beneath `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            content_file: root.join(layout::CONTENT_JSON),
            media_root: root.join(layout::MEDIA_DIR),
        }
    }

    /// The content file and media directory the site configuration names.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            content_file: config.content_file(),
            media_root: config.media_root(),
        }
    }
}

/// A media entry that was not written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    pub entry: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Archive entry the content came from.
    pub content_entry: String,
    /// Target content file.
    pub content_path: PathBuf,
    /// Media files written, in archive order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<SyncFailure>,
}

/// Read the archive at `archive_path` and replay it onto `target`.
///
/// With a `validator`, the archived content must pass validation before
/// anything is written.
pub fn sync_archive(
    archive_path: &Path,
    target: &SyncTarget,
    validator: Option<&ContentValidator>,
) -> Result<SyncReport, SyncError> {
    let bytes = std::fs::read(archive_path).map_err(|source| SyncError::Unreadable {
        path: archive_path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        archive = %archive_path.display(),
        content = %target.content_file.display(),
        media = %target.media_root.display(),
        "starting content sync"
    );
    sync_bytes(&bytes, target, validator)
}

/// Replay an in-memory archive onto `target`.
pub fn sync_bytes(
    bytes: &[u8],
    target: &SyncTarget,
    validator: Option<&ContentValidator>,
) -> Result<SyncReport, SyncError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let (content_entry, json) = read_content(&mut archive)?;
    if let Some(validator) = validator {
        let report = validator
            .validate_str(&json)
            .map_err(|e| SyncError::ContentRejected {
                errors: vec![e.to_string()],
            })?;
        if !report.is_valid() {
            return Err(SyncError::ContentRejected {
                errors: report.messages(),
            });
        }
    }

    let content_path = target.content_file.clone();
    write_atomic(&content_path, json.as_bytes()).map_err(|source| SyncError::ContentWrite {
        path: content_path.clone(),
        source,
    })?;
    tracing::info!(from = %content_entry, "updated {}", content_path.display());

    let mut report = SyncReport {
        content_entry: content_entry.to_string(),
        content_path,
        ..Default::default()
    };

    let media_prefix = format!("{}/", layout::MEDIA_DIR);
    for index in 0..archive.len() {
        let mut file = match archive.by_index(index) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(index, error = %e, "unreadable archive entry");
                report.failures.push(SyncFailure {
                    entry: format!("#{index}"),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let name = file.name().to_string();
        if file.is_dir() || !name.starts_with(&media_prefix) {
            continue;
        }

        let Some(relative) = file
            .enclosed_name()
            .filter(|p| is_plain_relative(p))
            .and_then(|p| media_relative(&p))
        else {
            tracing::warn!(entry = %name, "skipping entry that escapes the media root");
            report.failures.push(SyncFailure {
                entry: name,
                reason: "path escapes media root".to_string(),
            });
            continue;
        };

        let mut data = Vec::new();
        if let Err(e) = file.read_to_end(&mut data) {
            tracing::warn!(entry = %name, error = %e, "failed to read media entry");
            report.failures.push(SyncFailure {
                entry: name,
                reason: e.to_string(),
            });
            continue;
        }

        let destination = target.media_root.join(relative);
        match write_atomic(&destination, &data) {
            Ok(()) => {
                tracing::info!("updated {name}");
                report.written.push(destination);
            }
            Err(e) => {
                tracing::warn!(entry = %name, error = %e, "failed to write media file");
                report.failures.push(SyncFailure {
                    entry: name,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        media = report.written.len(),
        failures = report.failures.len(),
        "content sync completed"
    );
    Ok(report)
}

/// The archived content as JSON text, preferring the JSON entry and falling
/// back to the JSON embedded in a generated source entry.
fn read_content<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<(&'static str, String), SyncError> {
    if let Some(text) = read_entry(archive, layout::CONTENT_JSON)? {
        return Ok((layout::CONTENT_JSON, text));
    }
    if let Some(text) = read_entry(archive, layout::CONTENT_SOURCE)? {
        if let Some(json) = source::extract_json(&text) {
            return Ok((layout::CONTENT_SOURCE, json.to_string()));
        }
        tracing::warn!("{} does not embed content JSON", layout::CONTENT_SOURCE);
    }
    Err(SyncError::MissingContent {
        json: layout::CONTENT_JSON,
        source_entry: layout::CONTENT_SOURCE,
    })
}

fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, SyncError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|e| SyncError::InvalidArchive(ZipError::Io(e)))?;
    Ok(Some(text))
}

fn is_plain_relative(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Path of a media entry below the archive's media directory.
fn media_relative(entry: &Path) -> Option<PathBuf> {
    entry
        .strip_prefix(layout::MEDIA_DIR)
        .ok()
        .filter(|rest| !rest.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
