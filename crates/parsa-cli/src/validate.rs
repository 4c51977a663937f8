//! # Validate Subcommand
//!
//! Checks a content file against the content schema (the site's
//! `data/content-schema.json` when present, the embedded schema otherwise)
//! and prints one `<path>: <message>` line per violation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use parsa_core::SiteConfig;
use parsa_schema::ContentValidator;

use crate::resolve_path;

/// Arguments for `parsa validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Content file to validate. Defaults to the configured content file.
    pub path: Option<PathBuf>,

    /// Schema file to validate against instead of the configured one.
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

/// Execute the validate subcommand. Exit code 1 when the file is invalid.
pub fn run_validate(args: &ValidateArgs, config: &SiteConfig) -> Result<u8> {
    let path = match &args.path {
        Some(p) => resolve_path(p, &config.site_root),
        None => config.content_file(),
    };
    let validator = load_validator(args.schema.as_deref(), config)?;

    let report = validator
        .validate_file(&path)
        .with_context(|| format!("failed to validate {}", path.display()))?;

    if report.is_valid() {
        println!("OK: {} is valid", path.display());
        return Ok(0);
    }

    eprintln!("INVALID: {} ({} error(s))", path.display(), report.len());
    for violation in report.violations() {
        eprintln!("  {violation}");
    }
    Ok(1)
}

fn load_validator(schema: Option<&Path>, config: &SiteConfig) -> Result<ContentValidator> {
    match schema {
        Some(path) => {
            let path = resolve_path(path, &config.site_root);
            ContentValidator::from_file(&path)
                .with_context(|| format!("failed to load schema {}", path.display()))
        }
        None => ContentValidator::load_or_default(&config.schema_file())
            .context("failed to load content schema"),
    }
}
