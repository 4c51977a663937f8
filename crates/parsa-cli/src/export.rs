//! # Export Subcommand
//!
//! Packages the current store content, plus every local media file it
//! references, into `<out>/<product>-content-<date>.zip`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use parsa_core::fs::write_atomic;
use parsa_core::SiteConfig;
use parsa_export::{ContentExporter, ExportError, ExportFormat, ExportOptions};
use parsa_store::MediaStore;

use crate::open_store;

/// Arguments for `parsa export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Content payload format: `json` or `source`.
    #[arg(long, default_value = "json")]
    pub format: ExportFormat,

    /// Leave media files out of the archive.
    #[arg(long)]
    pub no_media: bool,

    /// Skip the image optimization pass.
    #[arg(long)]
    pub no_optimize: bool,

    /// Directory to write the archive into.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

impl ExportArgs {
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            include_media: !self.no_media,
            optimize_images: !self.no_optimize,
            format: self.format,
        }
    }
}

/// Execute the export subcommand. Exit code 1 when the content is invalid.
pub fn run_export(args: &ExportArgs, config: &SiteConfig) -> Result<u8> {
    match export_to(args, config)? {
        Ok(path) => {
            println!("OK: wrote {}", path.display());
            Ok(0)
        }
        Err(errors) => {
            eprintln!("Export failed ({} error(s)):", errors.len());
            for error in errors {
                eprintln!("  {error}");
            }
            Ok(1)
        }
    }
}

/// Write the archive and return its path, or the user-facing errors when
/// the content cannot be exported.
pub fn export_to(args: &ExportArgs, config: &SiteConfig) -> Result<Result<PathBuf, Vec<String>>> {
    let options = args.options();
    let store = open_store(config)?;
    let document = store.load().context("failed to load content")?;

    let mut exporter = ContentExporter::from_document(&document, store.validator())?
        .with_product_name(config.product_name.clone());
    if options.include_media {
        let media = MediaStore::from_config(config);
        for (url, bytes) in media.gather(document.media_references()) {
            exporter.add_media_file(url, bytes);
        }
    }

    let archive = match exporter.export(&options) {
        Ok(archive) => archive,
        Err(e @ ExportError::Validation { .. }) => return Ok(Err(e.errors())),
        Err(e) => return Err(e).context("export failed"),
    };
    for notice in &archive.notices {
        eprintln!("  note: {notice}");
    }

    let path = archive_path(&args.out, &archive.filename);
    write_atomic(&path, &archive.data)
        .with_context(|| format!("failed to write archive: {}", path.display()))?;
    tracing::info!(path = %path.display(), entries = archive.entries.len(), "export written");
    Ok(Ok(path))
}

fn archive_path(out: &Path, filename: &str) -> PathBuf {
    out.join(filename)
}
