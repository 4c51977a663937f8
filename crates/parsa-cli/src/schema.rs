//! # Schema Subcommand
//!
//! Prints the embedded content schema, or writes it to a file (typically
//! `data/content-schema.json` when bootstrapping a site).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use parsa_core::fs::write_atomic;
use parsa_core::SiteConfig;
use parsa_schema::CONTENT_SCHEMA;

/// Arguments for `parsa schema`.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Write the schema here instead of printing it.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_schema(args: &SchemaArgs, _config: &SiteConfig) -> Result<u8> {
    match &args.out {
        Some(path) => {
            write_atomic(path, CONTENT_SCHEMA.as_bytes())
                .with_context(|| format!("failed to write schema: {}", path.display()))?;
            println!("OK: wrote {}", path.display());
        }
        None => print!("{CONTENT_SCHEMA}"),
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_embedded_schema() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data/content-schema.json");
        let args = SchemaArgs {
            out: Some(out.clone()),
        };
        assert_eq!(run_schema(&args, &SiteConfig::default()).unwrap(), 0);
        assert_eq!(std::fs::read_to_string(out).unwrap(), CONTENT_SCHEMA);
    }
}
