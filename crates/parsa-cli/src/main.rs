//! # parsa CLI entry point
//!
//! Parses command-line arguments, loads the site configuration and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use parsa_cli::export::{run_export, ExportArgs};
use parsa_cli::projects::{run_project, run_projects, ProjectArgs, ProjectsArgs};
use parsa_cli::pull::{run_pull, PullArgs};
use parsa_cli::schema::{run_schema, SchemaArgs};
use parsa_cli::sync::{run_sync, SyncArgs};
use parsa_cli::validate::{run_validate, ValidateArgs};
use parsa_core::SiteConfig;

/// Parsa Decor site content toolchain.
///
/// Validates, exports and syncs the site content document and its media.
#[derive(Parser, Debug)]
#[command(name = "parsa", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./parsa.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a content file against the content schema.
    Validate(ValidateArgs),

    /// Export the current content as a zip archive.
    Export(ExportArgs),

    /// Replay an exported archive onto a site tree.
    Sync(SyncArgs),

    /// Download the export from a running admin API and sync it.
    Pull(PullArgs),

    /// List projects, optionally filtered by category.
    Projects(ProjectsArgs),

    /// Show one project.
    Project(ProjectArgs),

    /// Print or write the embedded content schema.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match SiteConfig::load(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(site_root = %config.site_root.display(), "resolved site root");

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Export(args) => run_export(args, &config),
        Commands::Sync(args) => run_sync(args, &config),
        Commands::Pull(args) => run_pull(args, &config),
        Commands::Projects(args) => run_projects(args, &config),
        Commands::Project(args) => run_project(args, &config),
        Commands::Schema(args) => run_schema(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsa_core::ProjectCategory;
    use parsa_export::ExportFormat;

    #[test]
    fn cli_parse_validate_default_path() {
        let cli = Cli::try_parse_from(["parsa", "validate"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert!(args.path.is_none());
            assert!(args.schema.is_none());
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_export_flags() {
        let cli = Cli::try_parse_from([
            "parsa",
            "export",
            "--format",
            "source",
            "--no-media",
            "--out",
            "dist",
        ])
        .unwrap();
        if let Commands::Export(args) = cli.command {
            assert_eq!(args.format, ExportFormat::Source);
            assert!(args.no_media);
            assert!(!args.no_optimize);
            assert_eq!(args.out, PathBuf::from("dist"));
        } else {
            panic!("expected export");
        }
    }

    #[test]
    fn cli_parse_export_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["parsa", "export", "--format", "yaml"]).is_err());
    }

    #[test]
    fn cli_parse_sync() {
        let cli = Cli::try_parse_from([
            "parsa",
            "sync",
            "site.zip",
            "--target-root",
            "../site",
            "--validate",
        ])
        .unwrap();
        if let Commands::Sync(args) = cli.command {
            assert_eq!(args.archive, PathBuf::from("site.zip"));
            assert_eq!(args.target_root, Some(PathBuf::from("../site")));
            assert!(args.validate);
        } else {
            panic!("expected sync");
        }
    }

    #[test]
    fn cli_parse_pull_requires_url() {
        assert!(Cli::try_parse_from(["parsa", "pull"]).is_err());
        let cli = Cli::try_parse_from(["parsa", "pull", "--url", "http://localhost:3000"]).unwrap();
        if let Commands::Pull(args) = cli.command {
            assert_eq!(args.url, "http://localhost:3000");
            assert_eq!(args.timeout_secs, 60);
        } else {
            panic!("expected pull");
        }
    }

    #[test]
    fn cli_parse_projects_category() {
        let cli = Cli::try_parse_from(["parsa", "projects", "--category", "small-rooms"]).unwrap();
        if let Commands::Projects(args) = cli.command {
            assert_eq!(args.category, Some(ProjectCategory::SmallRooms));
        } else {
            panic!("expected projects");
        }
        assert!(Cli::try_parse_from(["parsa", "projects", "--category", "garden"]).is_err());
    }

    #[test]
    fn cli_parse_global_flags() {
        let cli = Cli::try_parse_from(["parsa", "-vv", "schema", "--config", "site.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("site.yaml")));
    }
}
