//! Integration tests for `/gen/{id}`: lazy generation, streaming with the
//! code fence removed, and serving the stored page afterwards.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{body_frames, body_json, body_text, get, send, Ending, StubGenerator};
use pagen_core::prompt::SYSTEM_PROMPT;
use pagen_db::models::page::CreatePage;
use pagen_db::repositories::PageRepo;
use sqlx::SqlitePool;
use tokio::sync::Notify;

const ALICE_CHUNKS: &[&str] = &["```html\n<h1>", "Alice", "</h1>\n```"];

async fn stored_html(pool: &SqlitePool, id: i64) -> Option<String> {
    PageRepo::find_by_id(pool, id).await.unwrap().unwrap().html
}

// ---------------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn first_visit_streams_defenced_html_and_stores_it(pool: SqlitePool) {
    let generator = StubGenerator::new(ALICE_CHUNKS);
    let app = common::build_test_app(pool.clone(), generator.clone());
    let id = common::submit_alice(app.clone()).await;

    let response = get(app, &format!("/gen/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    assert_eq!(response.headers()[header::CONTENT_ENCODING], "identity");

    let (frames, errored) = body_frames(response).await;
    assert!(!errored);
    assert_eq!(frames, vec!["<h1>", "Alice", "</h1>\n"]);

    assert_eq!(stored_html(&pool, id).await.as_deref(), Some("<h1>Alice</h1>\n"));
    assert_eq!(generator.calls(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn model_receives_system_prompt_and_stored_prompt(pool: SqlitePool) {
    let generator = StubGenerator::new(ALICE_CHUNKS);
    let app = common::build_test_app(pool.clone(), generator.clone());
    let id = common::submit_alice(app.clone()).await;

    body_text(get(app, &format!("/gen/{id}")).await).await;

    let page = PageRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    let request = generator.last_request().unwrap();
    assert_eq!(request.model, "deepseek-v3");
    assert_eq!(request.system, SYSTEM_PROMPT);
    assert_eq!(request.prompt, page.prompt);
    assert_eq!(request.temperature, 0.4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn closer_split_across_chunks_is_never_sent(pool: SqlitePool) {
    let generator = StubGenerator::new(&["```html\n<b>x</b>`", "`", "`"]);
    let app = common::build_test_app(pool.clone(), generator);
    let id = common::submit_alice(app.clone()).await;

    let (frames, errored) = body_frames(get(app, &format!("/gen/{id}")).await).await;
    assert!(!errored);
    assert_eq!(frames.concat(), "<b>x</b>");
    assert_eq!(stored_html(&pool, id).await.as_deref(), Some("<b>x</b>"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unfenced_output_is_passed_through(pool: SqlitePool) {
    let generator = StubGenerator::new(&["<p>plain", " page</p>"]);
    let app = common::build_test_app(pool.clone(), generator);
    let id = common::submit_alice(app.clone()).await;

    let body = body_text(get(app, &format!("/gen/{id}")).await).await;
    assert_eq!(body, "<p>plain page</p>");
    assert_eq!(stored_html(&pool, id).await.as_deref(), Some("<p>plain page</p>"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn streamed_response_is_not_compressed(pool: SqlitePool) {
    let generator = StubGenerator::new(ALICE_CHUNKS);
    let app = common::build_test_app(pool.clone(), generator);
    let id = common::submit_alice(app.clone()).await;

    let request = Request::get(format!("/gen/{id}"))
        .header(header::ACCEPT_ENCODING, "gzip")
        .body(Body::empty())
        .unwrap();
    let response = send(app, request).await;

    assert_eq!(response.headers()[header::CONTENT_ENCODING], "identity");
    assert_eq!(body_text(response).await, "<h1>Alice</h1>\n");
}

// ---------------------------------------------------------------------------
// Cache then serve
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn later_visits_serve_the_stored_page(pool: SqlitePool) {
    let generator = StubGenerator::new(ALICE_CHUNKS);
    let app = common::build_test_app(pool.clone(), generator.clone());
    let id = common::submit_alice(app.clone()).await;

    let streamed = body_text(get(app.clone(), &format!("/gen/{id}")).await).await;
    let stored_before = PageRepo::find_by_id(&pool, id).await.unwrap().unwrap();

    for _ in 0..2 {
        let response = get(app.clone(), &format!("/gen/{id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(body_text(response).await, streamed);
    }

    assert_eq!(generator.calls(), 1);
    let stored_after = PageRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored_after.updated_at, stored_before.updated_at);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_id_returns_404(pool: SqlitePool) {
    let generator = StubGenerator::new(ALICE_CHUNKS);
    let app = common::build_test_app(pool, generator.clone());

    let response = get(app, "/gen/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    assert_eq!(generator.calls(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_id_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool, StubGenerator::new(ALICE_CHUNKS));

    let response = get(app, "/gen/alice").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mid_stream_failure_aborts_body_and_stores_nothing(pool: SqlitePool) {
    let failing = StubGenerator::with_ending(
        &["```html\n<h1>", "Ali"],
        Ending::Error("connection reset".into()),
    );
    let app = common::build_test_app(pool.clone(), failing);
    let id = common::submit_alice(app.clone()).await;

    let (frames, errored) = body_frames(get(app, &format!("/gen/{id}")).await).await;
    assert!(errored);
    assert_eq!(frames, vec!["<h1>", "Ali"]);
    assert!(stored_html(&pool, id).await.is_none());

    // The next visit starts over.
    let retry = StubGenerator::new(ALICE_CHUNKS);
    let app = common::build_test_app(pool.clone(), retry.clone());
    assert_eq!(
        body_text(get(app, &format!("/gen/{id}")).await).await,
        "<h1>Alice</h1>\n"
    );
    assert_eq!(retry.calls(), 1);
    assert_eq!(stored_html(&pool, id).await.as_deref(), Some("<h1>Alice</h1>\n"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn failed_store_write_aborts_body(pool: SqlitePool) {
    let gate = Arc::new(Notify::new());
    let generator = StubGenerator::with_ending(ALICE_CHUNKS, Ending::Gated(gate.clone()));
    let app = common::build_test_app(pool.clone(), generator);
    let id = common::submit_alice(app.clone()).await;

    let response = get(app, &format!("/gen/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The page row was read; make the final write fail.
    sqlx::query("DROP TABLE html_pages")
        .execute(&pool)
        .await
        .unwrap();
    gate.notify_one();

    let (frames, errored) = body_frames(response).await;
    assert!(errored);
    assert_eq!(frames.concat(), "<h1>Alice</h1>\n");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn model_missing_from_catalog_returns_502(pool: SqlitePool) {
    let page = PageRepo::create(
        &pool,
        &CreatePage {
            slug: "retired----000000".into(),
            prompt: "角色名字：Alice".into(),
            model: "retired-model".into(),
            title: "Alice's Tale".into(),
            description: None,
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool.clone(), StubGenerator::new(ALICE_CHUNKS));

    let response = get(app, &format!("/gen/{}", page.id)).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "GENERATION_FAILED");
    assert!(stored_html(&pool, page.id).await.is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn client_disconnect_abandons_generation(pool: SqlitePool) {
    let generator = StubGenerator::with_ending(&["```html\n<h1>"], Ending::Hang);
    let app = common::build_test_app(pool.clone(), generator.clone());
    let id = common::submit_alice(app.clone()).await;

    let response = get(app, &format!("/gen/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    drop(response);

    // The generation task notices the closed body and drops the model stream.
    let mut waited = Duration::ZERO;
    while !generator.stream_dropped() && waited < Duration::from_secs(5) {
        tokio::time::sleep(Duration::from_millis(10)).await;
        waited += Duration::from_millis(10);
    }
    assert!(generator.stream_dropped());
    assert!(stored_html(&pool, id).await.is_none());
}
