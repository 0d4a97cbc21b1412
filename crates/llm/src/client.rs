//! Streaming client for OpenAI-compatible chat-completion providers, built on
//! `rig`'s OpenAI completions client with a custom base URL.
//!
//! Each call resolves the short model name to a provider endpoint, builds a
//! single-turn agent around it and forwards the text deltas of its
//! streaming response through a bounded channel.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use rig::agent::MultiTurnStreamItem;
use rig::client::CompletionClient;
use rig::completion::{CompletionModel, GetTokenUsage};
use rig::providers::openai;
use rig::streaming::{StreamedAssistantContent, StreamingPrompt};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_stream::wrappers::ReceiverStream;

use crate::catalog::ModelCatalog;
use crate::error::LlmError;
use crate::generator::{ChunkStream, GenerationRequest, TextGenerator};

/// Text deltas buffered between the provider stream and the consumer.
const CHUNK_BUFFER: usize = 32;

type Chunk = Result<String, LlmError>;

/// Client for one OpenAI-compatible provider.
pub struct OpenAiCompatClient {
    client: openai::CompletionsClient,
    catalog: ModelCatalog,
    timeout: Duration,
}

impl OpenAiCompatClient {
    /// Create a client.
    ///
    /// * `base_url` - Provider root, e.g. `https://ark.cn-beijing.volces.com/api/v3`.
    /// * `timeout` - Upper bound on a whole generation, streaming included.
    pub fn new(
        base_url: &str,
        api_key: &str,
        catalog: ModelCatalog,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client: openai::CompletionsClient = openai::CompletionsClient::builder()
            .api_key(api_key)
            .base_url(base_url.trim_end_matches('/'))
            .build()
            .map_err(|e| LlmError::Config(e.to_string()))?;

        Ok(Self {
            client,
            catalog,
            timeout,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatClient {
    fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    async fn generate(&self, request: GenerationRequest) -> Result<ChunkStream, LlmError> {
        let endpoint = self.catalog.resolve(&request.model)?;
        tracing::debug!(model = %request.model, endpoint, "Opening completion stream");

        let agent = self
            .client
            .agent(endpoint)
            .preamble(&request.system)
            .temperature(request.temperature)
            .build();

        let (tx, mut rx) = mpsc::channel(CHUNK_BUFFER);
        let deadline = Instant::now() + self.timeout;
        tokio::spawn(forward_completion(agent, request.prompt, deadline, self.timeout, tx));

        // A rejected request surfaces as the first item; report it as a
        // failure to start.
        match rx.recv().await {
            None => Ok(stream::empty().boxed()),
            Some(Err(err)) => Err(err),
            Some(Ok(first)) => Ok(stream::once(std::future::ready(Ok(first)))
                .chain(ReceiverStream::new(rx))
                .boxed()),
        }
    }
}

/// Drive one streaming completion and forward its non-empty text deltas.
///
/// Stops after the first error, at the deadline, or once the receiver is
/// dropped.
async fn forward_completion<A, M, R>(
    agent: A,
    prompt: String,
    deadline: Instant,
    limit: Duration,
    tx: mpsc::Sender<Chunk>,
) where
    M: CompletionModel + 'static,
    R: Clone + Unpin + GetTokenUsage,
    A: StreamingPrompt<M, R>,
    <A as StreamingPrompt<M, R>>::Hook: 'static,
{
    let mut stream = agent.stream_prompt(prompt.as_str()).await;

    loop {
        let item = tokio::select! {
            item = stream.next() => item,
            () = tx.closed() => {
                tracing::debug!("Completion consumer gone, dropping provider stream");
                return;
            }
            () = tokio::time::sleep_until(deadline) => {
                let _ = tx.send(Err(LlmError::Timeout(limit))).await;
                return;
            }
        };

        match item {
            Some(Ok(MultiTurnStreamItem::StreamAssistantItem(StreamedAssistantContent::Text(
                text,
            )))) => {
                if text.text.is_empty() {
                    continue;
                }
                if tx.send(Ok(text.text)).await.is_err() {
                    return;
                }
            }
            Some(Ok(_)) => {}
            Some(Err(err)) => {
                tracing::warn!(error = %err, "Completion stream failed");
                let _ = tx.send(Err(LlmError::Provider(err.to_string()))).await;
                return;
            }
            None => return,
        }
    }
}
