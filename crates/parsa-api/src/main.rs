//! # parsa-api: Binary Entry Point
//!
//! Starts the HTTP server. Configuration comes from `parsa.yaml` (or the
//! file named by `PARSA_CONFIG`) with `PARSA_*` environment overrides; the
//! log filter comes from `RUST_LOG` (default `info`).

use std::path::PathBuf;

use parsa_api::state::AppState;
use parsa_core::SiteConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::var("PARSA_CONFIG").ok().map(PathBuf::from);
    let config = SiteConfig::load(config_path).map_err(|e| {
        tracing::error!("Configuration failed: {e}");
        e
    })?;
    let port = config.port;
    tracing::info!(
        site_root = %config.site_root.display(),
        content = %config.content_file().display(),
        "loaded site configuration"
    );

    let state = AppState::new(config).map_err(|e| {
        tracing::error!("Store initialization failed: {e}");
        e
    })?;
    match state.store.revision() {
        Ok(revision) => tracing::info!(%revision, "content file present"),
        Err(e) => tracing::warn!("content not readable yet: {e}"),
    }

    let app = parsa_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Parsa API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
