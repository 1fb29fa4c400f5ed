//! Landing page redirect and the static frontend bundle

use std::path::Path;

use axum::{Router, response::Redirect, routing::get};
use tower_http::services::ServeDir;

use crate::state::AppState;

const LANDING_PAGE: &str = "/static/index.html";

pub fn router(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .nest_service("/static", ServeDir::new(static_dir))
}

/// GET / - Redirect to the frontend
async fn root() -> Redirect {
    Redirect::temporary(LANDING_PAGE)
}
