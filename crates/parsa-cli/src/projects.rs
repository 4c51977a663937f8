//! # Project Lookups
//!
//! `parsa projects [--category C]` lists projects in document order;
//! `parsa project <ID>` prints one project as JSON.

use anyhow::Result;
use clap::Args;
use parsa_core::{ProjectCategory, SiteConfig};
use parsa_store::StoreError;

use crate::open_store;

/// Arguments for `parsa projects`.
#[derive(Args, Debug)]
pub struct ProjectsArgs {
    /// Only list projects in this category.
    #[arg(long)]
    pub category: Option<ProjectCategory>,
}

/// Arguments for `parsa project`.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project id.
    pub id: String,
}

pub fn run_projects(args: &ProjectsArgs, config: &SiteConfig) -> Result<u8> {
    let store = open_store(config)?;
    let projects = store.projects_by_category(args.category)?;

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(0);
    }
    println!("Projects ({}):", projects.len());
    for project in &projects {
        println!(
            "  {:<24} {:<12} {}",
            project.id,
            project.category.as_str(),
            project.title
        );
    }
    Ok(0)
}

/// Exit code 1 when no project has the id.
pub fn run_project(args: &ProjectArgs, config: &SiteConfig) -> Result<u8> {
    let store = open_store(config)?;
    match store.get_project(&args.id) {
        Ok(project) => {
            println!("{}", serde_json::to_string_pretty(&project)?);
            Ok(0)
        }
        Err(StoreError::ProjectNotFound { id }) => {
            eprintln!("No project with id '{id}'");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}
