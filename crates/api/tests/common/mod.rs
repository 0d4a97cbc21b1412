#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request, Response};
use axum::Router;
use futures::stream::{self, StreamExt};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tokio::sync::Notify;
use tower::ServiceExt;

use pagen_api::config::{LlmConfig, ServerConfig};
use pagen_api::router::build_app_router;
use pagen_api::state::AppState;
use pagen_llm::{ChunkStream, GenerationRequest, LlmError, ModelCatalog, TextGenerator};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
///
/// The provider URL points at a closed port; tests never reach it because
/// generation goes through [`StubGenerator`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        sample_pages_dir: PathBuf::from("/nonexistent/pagen-sample-pages"),
        llm: LlmConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "test-key".to_string(),
            catalog: ModelCatalog::default(),
            temperature: 0.4,
            timeout_secs: 5,
        },
    }
}

/// Build the full application router (same middleware stack as production)
/// around the given pool and generator.
pub fn build_test_app(pool: SqlitePool, generator: Arc<StubGenerator>) -> Router {
    build_test_app_with_config(pool, generator, test_config())
}

pub fn build_test_app_with_config(
    pool: SqlitePool,
    generator: Arc<StubGenerator>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Stub model gateway
// ---------------------------------------------------------------------------

/// How a [`StubGenerator`] stream ends after replaying its chunks.
#[derive(Debug, Clone)]
pub enum Ending {
    /// The stream completes normally.
    Complete,
    /// The stream yields a provider error.
    Error(String),
    /// The stream never completes.
    Hang,
    /// The stream completes once the gate is notified.
    Gated(Arc<Notify>),
}

/// Replays a fixed list of chunks and records every call.
pub struct StubGenerator {
    catalog: ModelCatalog,
    chunks: Vec<String>,
    ending: Ending,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerationRequest>>,
    stream_dropped: Arc<AtomicBool>,
}

impl StubGenerator {
    pub fn new(chunks: &[&str]) -> Arc<Self> {
        Self::with_ending(chunks, Ending::Complete)
    }

    pub fn with_ending(chunks: &[&str], ending: Ending) -> Arc<Self> {
        Arc::new(Self {
            catalog: ModelCatalog::default(),
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            ending,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            stream_dropped: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Number of `generate` calls, including rejected ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Whether the most recent stream has been dropped by its consumer.
    pub fn stream_dropped(&self) -> bool {
        self.stream_dropped.load(Ordering::SeqCst)
    }
}

/// Sets a flag when the stream holding it is dropped.
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    async fn generate(&self, request: GenerationRequest) -> Result<ChunkStream, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.catalog.resolve(&request.model)?;
        self.requests.lock().unwrap().push(request);

        self.stream_dropped.store(false, Ordering::SeqCst);
        let flag = DropFlag(Arc::clone(&self.stream_dropped));

        let chunks = stream::iter(self.chunks.clone().into_iter().map(Ok));
        let tail: ChunkStream = match &self.ending {
            Ending::Complete => stream::empty().boxed(),
            Ending::Error(message) => {
                stream::once(std::future::ready(Err(LlmError::Provider(message.clone())))).boxed()
            }
            Ending::Hang => stream::pending().boxed(),
            Ending::Gated(gate) => {
                let gate = Arc::clone(gate);
                stream::once(async move { gate.notified().await })
                    .filter_map(|()| std::future::ready(None))
                    .boxed()
            }
        };

        Ok(chunks
            .chain(tail)
            .map(move |item| {
                let _keep = &flag;
                item
            })
            .boxed())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

/// Data frames of a body in arrival order, and whether the body ended with
/// an error.
pub async fn body_frames(response: Response<Body>) -> (Vec<String>, bool) {
    let mut body = response.into_body();
    let mut frames = Vec::new();
    while let Some(frame) = body.frame().await {
        match frame {
            Ok(frame) => {
                if let Ok(data) = frame.into_data() {
                    frames.push(String::from_utf8(data.to_vec()).unwrap());
                }
            }
            Err(_) => return (frames, true),
        }
    }
    (frames, false)
}

/// Submit the reference character and return the new page id.
pub async fn submit_alice(app: Router) -> i64 {
    let response = post_json(
        app,
        "/submit-page",
        serde_json::json!({
            "character_name": "Alice",
            "character_setting": "A brave knight",
            "webpage_title": "Alice's Tale",
            "character_comment": "Great read!",
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await["id"].as_i64().unwrap()
}
