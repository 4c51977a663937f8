//! # Sync Subcommand
//!
//! Replays an exported archive onto a site tree. The configured content
//! file is overwritten and media files are written next to existing ones
//! in the configured media directory; nothing is deleted. Media entries that fail are reported but do not change the
//! exit code.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use parsa_core::SiteConfig;
use parsa_export::{SyncError, SyncReport, SyncTarget};
use parsa_schema::ContentValidator;

use crate::resolve_path;

/// Arguments for `parsa sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Exported zip archive.
    pub archive: PathBuf,

    /// Site root to write into, using the standard layout beneath it.
    /// Defaults to the configured content file and media directory.
    #[arg(long)]
    pub target_root: Option<PathBuf>,

    /// Validate the archived content before writing anything.
    #[arg(long)]
    pub validate: bool,
}

/// Execute the sync subcommand.
pub fn run_sync(args: &SyncArgs, config: &SiteConfig) -> Result<u8> {
    let archive = resolve_path(&args.archive, &config.site_root);
    let target = sync_target(args.target_root.as_deref(), config);
    let validator = sync_validator(args.validate, config)?;

    let result = parsa_export::sync_archive(&archive, &target, validator.as_ref());
    finish_sync(result)
}

/// Where a sync writes: the standard layout under an explicit root, or
/// the paths the configuration names.
pub fn sync_target(explicit_root: Option<&Path>, config: &SiteConfig) -> SyncTarget {
    match explicit_root {
        Some(root) => SyncTarget::under(root),
        None => SyncTarget::from_config(config),
    }
}

/// Validator for `--validate`, from the configured schema.
pub fn sync_validator(validate: bool, config: &SiteConfig) -> Result<Option<ContentValidator>> {
    if !validate {
        return Ok(None);
    }
    ContentValidator::load_or_default(&config.schema_file())
        .map(Some)
        .context("failed to load content schema")
}

/// Print a sync outcome and map it to an exit code. Rejected content is
/// reported line by line; other failures propagate.
pub fn finish_sync(result: Result<SyncReport, SyncError>) -> Result<u8> {
    let report = match result {
        Ok(report) => report,
        Err(SyncError::ContentRejected { errors }) => {
            eprintln!("Archived content is invalid ({} error(s)):", errors.len());
            for error in errors {
                eprintln!("  {error}");
            }
            return Ok(1);
        }
        Err(e) => return Err(e).context("sync failed"),
    };

    println!(
        "  content: {} (from {})",
        report.content_path.display(),
        report.content_entry
    );
    for path in &report.written {
        println!("  wrote:   {}", path.display());
    }
    for failure in &report.failures {
        eprintln!("  failed:  {} ({})", failure.entry, failure.reason);
    }
    println!(
        "Synced {} media file(s), {} failure(s)",
        report.written.len(),
        report.failures.len()
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relocated_config(root: &Path) -> SiteConfig {
        SiteConfig {
            content_path: PathBuf::from("content/site.json"),
            media_dir: PathBuf::from("static/media"),
            ..SiteConfig::default().with_site_root(root)
        }
    }

    #[test]
    fn explicit_target_root_uses_standard_layout() {
        let config = relocated_config(Path::new("/site"));
        assert_eq!(
            sync_target(Some(Path::new("/elsewhere")), &config),
            SyncTarget::under(Path::new("/elsewhere"))
        );
    }

    #[test]
    fn default_target_follows_configuration() {
        let config = relocated_config(Path::new("/site"));
        let target = sync_target(None, &config);
        assert_eq!(target.content_file, PathBuf::from("/site/content/site.json"));
        assert_eq!(target.media_root, PathBuf::from("/site/static/media"));
    }

    #[test]
    fn no_validator_without_flag() {
        let config = SiteConfig::default();
        assert!(sync_validator(false, &config).unwrap().is_none());
    }

    #[test]
    fn rejected_content_exits_one() {
        let result = Err(SyncError::ContentRejected {
            errors: vec!["/hero: \"title\" is a required property".to_string()],
        });
        assert_eq!(finish_sync(result).unwrap(), 1);
    }

    #[test]
    fn media_failures_keep_exit_zero() {
        let report = SyncReport {
            content_entry: "data/content.json".to_string(),
            content_path: PathBuf::from("data/content.json"),
            written: vec![],
            failures: vec![parsa_export::SyncFailure {
                entry: "public/images/../x.jpg".to_string(),
                reason: "path escapes media root".to_string(),
            }],
        };
        assert_eq!(finish_sync(Ok(report)).unwrap(), 0);
    }

    #[test]
    fn unreadable_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default().with_site_root(dir.path());
        let args = SyncArgs {
            archive: dir.path().join("missing.zip"),
            target_root: None,
            validate: false,
        };
        assert!(run_sync(&args, &config).is_err());
    }
}
