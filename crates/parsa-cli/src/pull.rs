//! # Pull Subcommand
//!
//! Build-time sync: downloads the export archive from a running admin API
//! (`GET {url}/api/admin/content/export`) and replays it onto the site tree
//! exactly as `parsa sync` would.
//!
//! A bearer token is sent when `--token` or `PARSA_ADMIN_TOKEN` is set, for
//! deployments that put the admin API behind an authenticating proxy.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use parsa_core::SiteConfig;

use crate::sync::{finish_sync, sync_target, sync_validator};

/// Environment variable consulted when `--token` is not given.
pub const ADMIN_TOKEN_ENV: &str = "PARSA_ADMIN_TOKEN";

const EXPORT_PATH: &str = "/api/admin/content/export";

/// Arguments for `parsa pull`.
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Base URL of the admin API, e.g. `http://localhost:3000`.
    #[arg(long)]
    pub url: String,

    /// Site root to write into, using the standard layout beneath it.
    /// Defaults to the configured content file and media directory.
    #[arg(long)]
    pub target_root: Option<PathBuf>,

    /// Bearer token for the admin API.
    #[arg(long)]
    pub token: Option<String>,

    /// Validate the downloaded content before writing anything.
    #[arg(long)]
    pub validate: bool,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,
}

/// Execute the pull subcommand.
pub fn run_pull(args: &PullArgs, config: &SiteConfig) -> Result<u8> {
    let url = export_url(&args.url);
    let token = args
        .token
        .clone()
        .or_else(|| std::env::var(ADMIN_TOKEN_ENV).ok())
        .filter(|t| !t.is_empty());

    let bytes = download(&url, token.as_deref(), Duration::from_secs(args.timeout_secs))?;
    println!("  downloaded: {url} ({} bytes)", bytes.len());

    let target = sync_target(args.target_root.as_deref(), config);
    let validator = sync_validator(args.validate, config)?;
    finish_sync(parsa_export::sync_bytes(&bytes, &target, validator.as_ref()))
}

/// Export endpoint under `base`, tolerating a trailing slash.
pub fn export_url(base: &str) -> String {
    format!("{}{EXPORT_PATH}", base.trim_end_matches('/'))
}

fn download(url: &str, token: Option<&str>, timeout: Duration) -> Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")?;

    let mut request = client.get(url);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    tracing::info!(%url, "downloading content export");
    let response = request
        .send()
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()
        .with_context(|| format!("admin API rejected export request to {url}"))?;
    let bytes = response
        .bytes()
        .with_context(|| format!("failed to read export body from {url}"))?;
    Ok(bytes.to_vec())
}
