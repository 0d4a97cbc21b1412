//! Route definitions for page submission and serving.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{generation, submission};
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// POST /submit-page          -> submit_page       (JSON, returns id)
/// POST /submit-page-form     -> submit_page_form  (form, 302 to /gen/{id})
/// GET  /gen/{id}             -> serve_page        (cached or streamed HTML)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit-page", post(submission::submit_page))
        .route("/submit-page-form", post(submission::submit_page_form))
        .route("/gen/{id}", get(generation::serve_page))
}
