pub mod admin;
pub mod docs;
pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Build the complete route tree (without middleware or state).
///
/// ```text
/// /health                       liveness
/// /submit-page                  JSON submission
/// /submit-page-form             form submission
/// /gen/{id}                     serve or generate a page
/// /list, /clear,
/// /add-html, /add-test-files    maintenance
/// /tmp-task/...                 maintenance, with a help index at /tmp-task
/// /openapi.json, /docs          API description
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(pages::router())
        .merge(admin::router())
        .nest("/tmp-task", admin::nested_router())
        .merge(docs::router())
}
