//! # Site Configuration
//!
//! Priority: environment variables > config file > defaults. The defaults
//! describe the standard layout relative to the working directory, so a
//! site checked out at `.` needs no configuration at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "parsa.yaml";

/// Default upload cap: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

/// Where the site lives and how the admin surface behaves.
///
/// Relative paths are resolved against `site_root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_root: PathBuf,
    pub content_path: PathBuf,
    pub schema_path: PathBuf,
    pub media_dir: PathBuf,
    /// Public URL prefix for uploaded media.
    pub media_url_prefix: String,
    /// Archive filename prefix.
    pub product_name: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            content_path: PathBuf::from(layout::CONTENT_JSON),
            schema_path: PathBuf::from(layout::CONTENT_SCHEMA),
            media_dir: PathBuf::from(layout::MEDIA_DIR),
            media_url_prefix: layout::MEDIA_URL_PREFIX.to_string(),
            product_name: "parsa-decor".to_string(),
            port: 3000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl SiteConfig {
    /// Load from `config_path` (or `parsa.yaml` when `None`), then apply
    /// `PARSA_*` environment overrides. A missing file means defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Read a YAML config file; defaults when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// [`SiteConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PARSA_SITE_ROOT") {
            self.site_root = PathBuf::from(v);
        }
        if let Some(v) = lookup("PARSA_CONTENT_PATH") {
            self.content_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("PARSA_SCHEMA_PATH") {
            self.schema_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("PARSA_MEDIA_DIR") {
            self.media_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("PARSA_PRODUCT_NAME") {
            self.product_name = v;
        }
        if let Some(v) = lookup("PARSA_PORT") {
            self.port = v.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "PARSA_PORT",
                value: v,
            })?;
        }
        if let Some(v) = lookup("PARSA_MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = v.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "PARSA_MAX_UPLOAD_BYTES",
                value: v,
            })?;
        }
        Ok(())
    }

    /// Same configuration rooted somewhere else.
    pub fn with_site_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.site_root = root.into();
        self
    }

    pub fn content_file(&self) -> PathBuf {
        self.resolve(&self.content_path)
    }

    pub fn schema_file(&self) -> PathBuf {
        self.resolve(&self.schema_path)
    }

    pub fn media_root(&self) -> PathBuf {
        self.resolve(&self.media_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.site_root.join(path)
        }
    }
}
