//! # parsa-cli: Site Content Toolchain
//!
//! Provides the `parsa` command-line interface over the content store,
//! schema validator, exporter and archive sync.
//!
//! ## Subcommands
//!
//! - `parsa validate`: Validate a content file against the schema.
//! - `parsa export`: Package the current content as a zip archive.
//! - `parsa sync`: Replay an exported archive onto a site tree.
//! - `parsa pull`: Download an export from a running admin API and sync it.
//! - `parsa projects` / `parsa project`: Project lookups.
//! - `parsa schema`: Print or write the embedded content schema.
//!
//! ```bash
//! parsa validate data/content.json
//! parsa export --format source --out dist
//! parsa sync parsa-decor-content-2024-05-01.zip --target-root ../site
//! parsa pull --url https://admin.parsadecor.example
//! ```
//!
//! Every handler returns `anyhow::Result<u8>`: `Ok(code)` is the process
//! exit code, `Err` is reported by the binary and exits with 1.

pub mod export;
pub mod projects;
pub mod pull;
pub mod schema;
pub mod sync;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parsa_core::SiteConfig;
use parsa_store::ContentStore;

/// Resolve a command-line path against the current directory.
///
/// Absolute paths are returned as-is; relative paths that exist under
/// `site_root` resolve there first.
pub fn resolve_path(path: &Path, site_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let site_relative = site_root.join(path);
    if site_relative.exists() {
        site_relative
    } else {
        path.to_path_buf()
    }
}

/// Open the content store described by `config`.
pub fn open_store(config: &SiteConfig) -> Result<ContentStore> {
    ContentStore::from_config(config).with_context(|| {
        format!(
            "failed to open content store at {}",
            config.content_file().display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_absolute_path_returned_as_is() {
        let result = resolve_path(Path::new("/abs/content.json"), Path::new("/site"));
        assert_eq!(result, PathBuf::from("/abs/content.json"));
    }

    #[test]
    fn resolve_path_prefers_site_relative_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("content.json"), b"{}").unwrap();
        let result = resolve_path(Path::new("content.json"), dir.path());
        assert_eq!(result, dir.path().join("content.json"));
    }

    #[test]
    fn resolve_path_falls_back_to_cwd_relative() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_path(Path::new("missing.json"), dir.path());
        assert_eq!(result, PathBuf::from("missing.json"));
    }

    #[test]
    fn open_store_points_at_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default().with_site_root(dir.path());
        let store = open_store(&config).unwrap();
        assert_eq!(store.path(), dir.path().join("data/content.json"));
    }
}
