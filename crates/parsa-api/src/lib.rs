//! # parsa-api: HTTP Service for the Parsa Decor Site
//!
//! ## API Surface
//!
//! | Route                          | Module                | Purpose                   |
//! |--------------------------------|-----------------------|---------------------------|
//! | `/health`                      | [`routes::health`]    | Liveness                  |
//! | `/api/admin/content`           | [`routes::content`]   | Read, replace, patch      |
//! | `/api/admin/content/export`    | [`routes::export`]    | Zip archive download      |
//! | `/api/admin/media/upload`      | [`routes::media`]     | Image upload              |
//! | `/api/projects/*`              | [`routes::projects`]  | Public project queries    |
//!
//! Admin routes carry no authentication of their own; deploy them behind
//! an authenticating proxy.
//!
//! ## Middleware Stack
//!
//! ```text
//! TraceLayer → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .merge(routes::health::router())
        .merge(routes::content::router())
        .merge(routes::export::router())
        .merge(routes::media::router(upload_limit))
        .merge(routes::projects::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
