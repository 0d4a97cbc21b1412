use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::catalog::ModelCatalog;
use crate::error::LlmError;

/// Text fragments in the order the model produced them.
pub type ChunkStream = BoxStream<'static, Result<String, LlmError>>;

/// One generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Short model name, resolved through the [`ModelCatalog`].
    pub model: String,
    /// System message.
    pub system: String,
    /// User message.
    pub prompt: String,
    pub temperature: f64,
}

/// A text-generation capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Model names this generator accepts.
    fn catalog(&self) -> &ModelCatalog;

    /// Start generating.
    ///
    /// Fails before producing any chunk when the model name is unknown or the
    /// provider rejects the request. Failures after that point arrive as an
    /// `Err` item, after which the stream ends.
    async fn generate(&self, request: GenerationRequest) -> Result<ChunkStream, LlmError>;
}
