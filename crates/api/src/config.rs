use std::path::PathBuf;
use std::time::Duration;

use pagen_core::prompt::DEFAULT_TEMPERATURE;
use pagen_llm::catalog::{DEFAULT_MODEL, DEFAULT_MODEL_ENDPOINTS};
use pagen_llm::ModelCatalog;

/// Server configuration loaded from environment variables.
///
/// All fields except the provider API key have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite database URL (default: `sqlite://pagen.db`).
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Time allowed to produce response headers, in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory scanned by the sample page import.
    pub sample_pages_dir: PathBuf,
    /// Model provider settings.
    pub llm: LlmConfig,
}

/// Connection settings for the OpenAI-compatible model provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: String,
    pub catalog: ModelCatalog,
    pub temperature: f64,
    /// Upper bound on a whole generation request, streaming included.
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                    |
    /// |------------------------|--------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                  |
    /// | `PORT`                 | `3000`                                     |
    /// | `DATABASE_URL`         | `sqlite://pagen.db`                        |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                       |
    /// | `SAMPLE_PAGES_DIR`     | `model-page-gen-test-results`              |
    ///
    /// Provider settings are read by [`LlmConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://pagen.db".into());

        let cors_origins = parse_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let sample_pages_dir = std::env::var("SAMPLE_PAGES_DIR")
            .unwrap_or_else(|_| "model-page-gen-test-results".into())
            .into();

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            sample_pages_dir,
            llm: LlmConfig::from_env(),
        }
    }
}

impl LlmConfig {
    /// Load provider settings from environment variables.
    ///
    /// | Env Var             | Default                                      |
    /// |---------------------|----------------------------------------------|
    /// | `LLM_BASE_URL`      | `https://ark.cn-beijing.volces.com/api/v3`   |
    /// | `LLM_API_KEY`       | required                                     |
    /// | `LLM_MODELS`        | built-in `deepseek-v3` and `seed1.6` entries |
    /// | `LLM_DEFAULT_MODEL` | `deepseek-v3`                                |
    /// | `LLM_TEMPERATURE`   | `0.4`                                        |
    /// | `LLM_TIMEOUT_SECS`  | `300`                                        |
    ///
    /// Panics on a missing key or an inconsistent model catalog, so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| "https://ark.cn-beijing.volces.com/api/v3".into());

        let api_key = std::env::var("LLM_API_KEY").expect("LLM_API_KEY must be set");

        let models = std::env::var("LLM_MODELS").unwrap_or_else(|_| DEFAULT_MODEL_ENDPOINTS.into());
        let default_model =
            std::env::var("LLM_DEFAULT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let catalog = ModelCatalog::parse(&models, &default_model)
            .unwrap_or_else(|e| panic!("Invalid LLM_MODELS / LLM_DEFAULT_MODEL: {e}"));

        let temperature: f64 = std::env::var("LLM_TEMPERATURE")
            .map(|v| v.parse().expect("LLM_TEMPERATURE must be a number"))
            .unwrap_or(DEFAULT_TEMPERATURE);

        let timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("LLM_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            catalog,
            temperature,
            timeout_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
