//! Fixed mapping from short model names to provider endpoint ids.

use indexmap::IndexMap;

use crate::error::LlmError;

/// Model used when a submission does not name one.
pub const DEFAULT_MODEL: &str = "deepseek-v3";

/// Built-in `name=endpoint` pairs.
pub const DEFAULT_MODEL_ENDPOINTS: &str =
    "deepseek-v3=ep-20250407151147-z8dqb,seed1.6=ep-20250618140439-2qzbx";

/// The models the service offers, in configuration order.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    endpoints: IndexMap<String, String>,
    default_model: String,
}

impl ModelCatalog {
    /// Build a catalog. The default model must be one of the entries.
    pub fn new(
        endpoints: IndexMap<String, String>,
        default_model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let default_model = default_model.into();
        if endpoints.is_empty() {
            return Err(LlmError::Config("model catalog is empty".into()));
        }
        if !endpoints.contains_key(&default_model) {
            return Err(LlmError::Config(format!(
                "default model '{default_model}' is not in the catalog"
            )));
        }
        Ok(Self {
            endpoints,
            default_model,
        })
    }

    /// Parse comma-separated `name=endpoint` pairs.
    ///
    /// ```
    /// use pagen_llm::ModelCatalog;
    ///
    /// let catalog = ModelCatalog::parse("a=ep-1, b=ep-2", "b").unwrap();
    /// assert_eq!(catalog.resolve("a").unwrap(), "ep-1");
    /// assert_eq!(catalog.default_model(), "b");
    /// ```
    pub fn parse(pairs: &str, default_model: &str) -> Result<Self, LlmError> {
        let mut endpoints = IndexMap::new();
        for pair in pairs.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, endpoint) = pair
                .split_once('=')
                .map(|(n, e)| (n.trim(), e.trim()))
                .filter(|(n, e)| !n.is_empty() && !e.is_empty())
                .ok_or_else(|| LlmError::Config(format!("expected name=endpoint, got '{pair}'")))?;
            endpoints.insert(name.to_string(), endpoint.to_string());
        }
        Self::new(endpoints, default_model)
    }

    /// Endpoint id for a short model name.
    pub fn resolve(&self, model: &str) -> Result<&str, LlmError> {
        self.endpoints
            .get(model)
            .map(String::as_str)
            .ok_or_else(|| LlmError::UnknownModel(model.to_string()))
    }

    pub fn contains(&self, model: &str) -> bool {
        self.endpoints.contains_key(model)
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Model names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::parse(DEFAULT_MODEL_ENDPOINTS, DEFAULT_MODEL).expect("built-in catalog is valid")
    }
}
