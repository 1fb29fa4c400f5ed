//! HTTP surface of the Mergington activity signup service.

pub mod routes;
pub mod singleton;
pub mod state;

use std::path::Path;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::site::router(static_dir))
        .merge(routes::activities::router())
        .with_state(state)
        .layer(cors)
}
