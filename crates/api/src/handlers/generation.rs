//! Serve a page by id, generating it on the first request.
//!
//! A cached page is returned as stored. Otherwise the model output is
//! streamed to the client with the surrounding code fence removed, and the
//! final HTML is stored once the model stream has been fully consumed.
//! Nothing is stored when the model fails or the client goes away.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_ENCODING, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Response};
use futures::StreamExt;
use pagen_core::error::CoreError;
use pagen_core::fence::FenceStripper;
use pagen_core::prompt::SYSTEM_PROMPT;
use pagen_core::types::DbId;
use pagen_db::repositories::PageRepo;
use pagen_db::DbPool;
use pagen_llm::{ChunkStream, GenerationRequest, LlmError};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Visible fragments buffered between the generation task and the response
/// body.
const STREAM_BUFFER: usize = 32;

/// Why a streamed page body was aborted.
#[derive(Debug, thiserror::Error)]
enum StreamError {
    #[error(transparent)]
    Generation(#[from] LlmError),
    #[error("failed to store generated page: {0}")]
    Store(sqlx::Error),
}

type Fragment = Result<String, StreamError>;

/// GET /gen/{id}
#[utoipa::path(get, path = "/gen/{id}", tag = "Pages",
    params(("id" = i64, Path, description = "Page id")),
    responses(
        (status = 200, description = "Page HTML, streamed while it is being generated", body = String, content_type = "text/html"),
        (status = 400, description = "Id is not a number"),
        (status = 404, description = "No page with this id"),
        (status = 502, description = "The model provider rejected the request"),
    ))]
pub async fn serve_page(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let page = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;

    if let Some(html) = page.html {
        tracing::debug!(page_id = id, "Serving stored page");
        return Ok(Html(html).into_response());
    }

    tracing::info!(page_id = id, model = %page.model, "Page not generated yet, starting generation");

    let chunks = state
        .generator
        .generate(GenerationRequest {
            model: page.model,
            system: SYSTEM_PROMPT.to_string(),
            prompt: page.prompt,
            temperature: state.config.llm.temperature,
        })
        .await?;

    let (tx, rx) = mpsc::channel(STREAM_BUFFER);
    tokio::spawn(stream_generation(state.pool.clone(), id, chunks, tx));

    Ok((
        [
            (CONTENT_TYPE, "text/html; charset=utf-8"),
            (CONTENT_ENCODING, "identity"),
        ],
        Body::from_stream(ReceiverStream::new(rx)),
    )
        .into_response())
}

/// Drive one generation: forward newly visible text to `tx`, then store the
/// final HTML.
///
/// `tx` is dropped only when this returns, so the response body ends after
/// the page has been stored.
async fn stream_generation(
    pool: DbPool,
    page_id: DbId,
    mut chunks: ChunkStream,
    tx: mpsc::Sender<Fragment>,
) {
    let mut stripper = FenceStripper::new();

    loop {
        let item = tokio::select! {
            item = chunks.next() => item,
            () = tx.closed() => {
                tracing::warn!(
                    page_id,
                    received = stripper.raw().len(),
                    sent = stripper.emitted_len(),
                    "Client disconnected, generation abandoned"
                );
                return;
            }
        };

        match item {
            Some(Ok(chunk)) => {
                let fresh = stripper.push(&chunk);
                if !send(&tx, page_id, fresh).await {
                    return;
                }
            }
            Some(Err(err)) => {
                tracing::error!(page_id, error = %err, "Generation failed mid-stream, page left ungenerated");
                // Ending the body with an error aborts the transfer.
                let _ = tx.send(Err(err.into())).await;
                return;
            }
            None => break,
        }
    }

    let (rest, html) = stripper.finish();
    if !send(&tx, page_id, rest).await {
        return;
    }

    match PageRepo::set_generated_html(&pool, page_id, &html).await {
        Ok(true) => tracing::info!(page_id, bytes = html.len(), "Page generated and stored"),
        Ok(false) => tracing::warn!(page_id, "Page was stored by another request, keeping that version"),
        Err(err) => {
            tracing::error!(page_id, error = %err, "Failed to store generated page");
            // The page stays ungenerated; abort the body so the client
            // does not take it as complete.
            let _ = tx.send(Err(StreamError::Store(err))).await;
        }
    }
}

/// Forward a fragment to the client. Empty fragments are skipped. Returns
/// `false` once the client has gone away.
async fn send(tx: &mpsc::Sender<Fragment>, page_id: DbId, fragment: String) -> bool {
    if fragment.is_empty() {
        return !tx.is_closed();
    }
    if tx.send(Ok(fragment)).await.is_err() {
        tracing::warn!(page_id, "Client disconnected, generation abandoned");
        return false;
    }
    true
}
