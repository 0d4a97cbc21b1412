use std::time::Duration;

/// Errors from the model gateway.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The short model name is not in the catalog.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// The model catalog or client configuration is unusable.
    #[error("Invalid model configuration: {0}")]
    Config(String),

    /// The provider rejected the request or failed while streaming.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The generation did not finish within the configured limit.
    #[error("Generation exceeded {0:?}")]
    Timeout(Duration),
}
