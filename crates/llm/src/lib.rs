//! Model Gateway: turns a model name and a prompt into a lazy stream of text.
//!
//! [`TextGenerator`] is the seam the HTTP layer depends on.
//! [`OpenAiCompatClient`] implements it against any OpenAI-compatible
//! chat-completions provider; tests substitute their own implementation.

pub mod catalog;
pub mod client;
pub mod error;
pub mod generator;

pub use catalog::ModelCatalog;
pub use client::OpenAiCompatClient;
pub use error::LlmError;
pub use generator::{ChunkStream, GenerationRequest, TextGenerator};
