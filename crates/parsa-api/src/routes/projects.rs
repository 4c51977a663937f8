//! # Public Project Queries
//!
//! - **GET `/api/projects`**: all projects in document order, optionally
//!   filtered with `?category=residential|commercial|small-rooms`.
//! - **GET `/api/projects/categories`**: distinct categories, first-seen order.
//! - **GET `/api/projects/{id}`**: one project, or 404.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use parsa_core::{Project, ProjectCategory};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    pub category: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects))
        .route("/api/projects/categories", get(list_categories))
        .route("/api/projects/{id}", get(get_project))
}

async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<Vec<Project>>, AppError> {
    let category = query
        .category
        .as_deref()
        .map(str::parse::<ProjectCategory>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Json(state.store.projects_by_category(category)?))
}

async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectCategory>>, AppError> {
    Ok(Json(state.store.project_categories()?))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(state.store.get_project(&id)?))
}
