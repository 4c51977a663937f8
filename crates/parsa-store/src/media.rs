//! # Media Store
//!
//! Uploaded images land in the public media directory under a
//! timestamp-derived name (`<unix-millis><ext>`), and are referenced from
//! content as `<url-prefix>/<name>`. Only the image types in
//! [`ALLOWED_MEDIA_TYPES`] are accepted, up to a configured size.

use std::fs::OpenOptions;
use std::io;
use std::path::{Component, Path, PathBuf};

use parsa_core::fs::write_atomic;
use parsa_core::SiteConfig;
use serde::Serialize;

use crate::error::MediaError;

/// Accepted upload types and the extension used when the upload name has
/// none.
pub const ALLOWED_MEDIA_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/webp", ".webp"),
    ("image/gif", ".gif"),
];

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredMedia {
    /// Public reference to put in content, e.g. `/images/1700000000000.jpg`.
    pub url: String,
    pub filename: String,
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    url_prefix: String,
    max_bytes: usize,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
            max_bytes,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            config.media_root(),
            config.media_url_prefix.clone(),
            config.max_upload_bytes,
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Accept one uploaded file, named by the current time.
    pub fn store(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredMedia, MediaError> {
        self.store_at(
            original_name,
            content_type,
            bytes,
            chrono::Utc::now().timestamp_millis(),
        )
    }

    /// Accept one uploaded file, named from `millis`. A name already taken
    /// moves to the next free millisecond.
    pub fn store_at(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
        millis: i64,
    ) -> Result<StoredMedia, MediaError> {
        let default_ext = ALLOWED_MEDIA_TYPES
            .iter()
            .find(|(mime, _)| mime.eq_ignore_ascii_case(content_type))
            .map(|(_, ext)| *ext)
            .ok_or_else(|| MediaError::UnsupportedType {
                content_type: content_type.to_string(),
                allowed: ALLOWED_MEDIA_TYPES.map(|(mime, _)| mime).join(", "),
            })?;
        if bytes.is_empty() {
            return Err(MediaError::Empty);
        }
        if bytes.len() > self.max_bytes {
            return Err(MediaError::TooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let ext = original_extension(original_name).unwrap_or_else(|| default_ext.to_string());
        let (filename, path) = self.reserve(millis, &ext)?;

        if let Err(source) = write_atomic(&path, bytes) {
            let _ = std::fs::remove_file(&path);
            return Err(MediaError::Write { path, source });
        }
        tracing::info!(file = %filename, size = bytes.len(), content_type, "media stored");

        Ok(StoredMedia {
            url: format!("{}/{filename}", self.url_prefix),
            filename,
            path,
        })
    }

    /// Claim `<stamp><ext>` for the first stamp at or after `millis` whose
    /// name is free. The claim is an empty file created exclusively, so two
    /// uploads racing for the same millisecond never share a name.
    fn reserve(&self, millis: i64, ext: &str) -> Result<(String, PathBuf), MediaError> {
        std::fs::create_dir_all(&self.root).map_err(|source| MediaError::Write {
            path: self.root.clone(),
            source,
        })?;
        let mut stamp = millis;
        loop {
            let filename = format!("{stamp}{ext}");
            let path = self.root.join(&filename);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok((filename, path)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => stamp += 1,
                Err(source) => return Err(MediaError::Write { path, source }),
            }
        }
    }

    /// File backing a media reference, if the reference points into this
    /// store and the file exists. Remote URLs and references that would
    /// leave the media directory resolve to `None`.
    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let relative = reference
            .strip_prefix(&self.url_prefix)?
            .strip_prefix('/')?;
        let relative = Path::new(relative);
        if relative.as_os_str().is_empty()
            || !relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }
        let path = self.root.join(relative);
        path.is_file().then_some(path)
    }

    /// Read every resolvable reference. Unresolvable references are skipped;
    /// unreadable files are logged and skipped.
    pub fn gather<'a, I>(&self, references: I) -> Vec<(String, Vec<u8>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found = Vec::new();
        for reference in references {
            let Some(path) = self.resolve(reference) else {
                tracing::debug!(reference, "media reference is not a local file");
                continue;
            };
            match std::fs::read(&path) {
                Ok(bytes) => found.push((reference.to_string(), bytes)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to read media file")
                }
            }
        }
        found
    }
}

/// Lowercased `.ext` of an upload name, when it has one.
fn original_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
}
