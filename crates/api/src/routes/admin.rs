//! Route definitions for the maintenance endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Maintenance routes.
///
/// ```text
/// GET    /list              -> list_pages
/// DELETE /clear             -> clear_pages
/// POST   /add-html          -> add_html
/// POST   /add-test-files    -> add_test_files
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(admin::list_pages))
        .route("/clear", delete(admin::clear_pages))
        .route("/add-html", post(admin::add_html))
        .route("/add-test-files", post(admin::add_test_files))
}

/// The maintenance routes plus a help index, for mounting under `/tmp-task`.
pub fn nested_router() -> Router<AppState> {
    router().route("/", get(admin::help))
}
