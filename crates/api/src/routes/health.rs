use axum::{routing::get, Router};

use crate::state::AppState;

/// GET /health -- liveness check.
#[utoipa::path(get, path = "/health", tag = "Health",
    responses((status = 200, description = "Service is up", body = String, content_type = "text/plain")))]
pub async fn health_check() -> &'static str {
    "OK"
}

/// Mount health check routes at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
