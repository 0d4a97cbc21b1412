use std::sync::Arc;

use pagen_llm::TextGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pagen_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Model gateway used for lazy page generation.
    pub generator: Arc<dyn TextGenerator>,
}
