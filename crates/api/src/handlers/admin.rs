//! Maintenance endpoints operating directly on stored pages.
//!
//! None of these call the model. Imported pages already carry their HTML.

use std::path::Path;

use axum::extract::State;
use axum::Json;
use pagen_core::page_meta::{extract_description, extract_title, preview, LISTING_DESCRIPTION_CHARS};
use pagen_core::slug::file_slug;
use pagen_core::types::{DbId, Timestamp};
use pagen_db::models::page::{ImportAction, ImportPage, Page};
use pagen_db::repositories::PageRepo;
use pagen_db::DbPool;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::samples::SAMPLE_PAGES;
use crate::state::AppState;

/// Model recorded for an uploaded page that does not name one.
const UNKNOWN_MODEL: &str = "unknown";

/// Prompt recorded for an uploaded page that does not carry one.
const UPLOADED_PROMPT: &str = "Manually uploaded HTML content";

/// Prompt recorded for pages imported from sample files.
const SAMPLE_PROMPT: &str = "Test page generated by AI model";

/// Import action reported for a sample file that could not be read.
const FAILED_ACTION: &str = "failed";

// ---------------------------------------------------------------------------
// Help
// ---------------------------------------------------------------------------

/// GET /tmp-task
pub async fn help() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Maintenance endpoints - import and inspect stored HTML pages",
        "available_endpoints": [
            "GET / - This help message",
            "POST /add-html - Add single HTML page (requires: {slug, html, model?, prompt?})",
            "POST /add-test-files - Import sample test files",
            "GET /list - List all pages in database",
            "DELETE /clear - Clear all pages from database",
        ],
        "usage_examples": {
            "add_single_html": {
                "method": "POST",
                "url": "/tmp-task/add-html",
                "body": {
                    "slug": "my-page",
                    "html": "<html>...</html>",
                    "model": "gpt-4",
                    "prompt": "Generate a test page",
                },
            },
        },
    }))
}

// ---------------------------------------------------------------------------
// List / clear
// ---------------------------------------------------------------------------

/// One entry of the page listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageListItem {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub model: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    /// First 100 characters of the description, followed by `...`.
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageListResponse {
    pub count: usize,
    pub pages: Vec<PageListItem>,
}

/// GET /list
#[utoipa::path(get, path = "/list", tag = "Admin",
    responses((status = 200, body = PageListResponse)))]
pub async fn list_pages(State(state): State<AppState>) -> AppResult<Json<PageListResponse>> {
    let pages: Vec<PageListItem> = PageRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|page| PageListItem {
            id: page.id,
            slug: page.slug,
            title: page.title,
            model: page.model,
            created_at: page.created_at,
            description: page
                .description
                .map(|d| preview(&d, LISTING_DESCRIPTION_CHARS)),
        })
        .collect();

    Ok(Json(PageListResponse {
        count: pages.len(),
        pages,
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearResponse {
    pub message: String,
    pub deleted: u64,
}

/// DELETE /clear
#[utoipa::path(delete, path = "/clear", tag = "Admin",
    responses((status = 200, body = ClearResponse)))]
pub async fn clear_pages(State(state): State<AppState>) -> AppResult<Json<ClearResponse>> {
    let deleted = PageRepo::delete_all(&state.pool).await?;
    tracing::warn!(deleted, "Cleared all pages");

    Ok(Json(ClearResponse {
        message: "All pages cleared from database".to_string(),
        deleted,
    }))
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddHtmlRequest {
    pub slug: Option<String>,
    pub html: Option<String>,
    /// Defaults to `unknown`.
    pub model: Option<String>,
    /// Defaults to a note that the page was uploaded by hand.
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddHtmlResponse {
    pub message: String,
    pub slug: String,
    pub title: String,
    /// `created` or `updated`.
    pub action: String,
    pub model: String,
}

/// POST /add-html
///
/// Store ready-made HTML under a slug, replacing any page with that slug.
#[utoipa::path(post, path = "/add-html", tag = "Admin",
    request_body = AddHtmlRequest,
    responses(
        (status = 200, body = AddHtmlResponse),
        (status = 400, description = "Missing slug or html"),
    ))]
pub async fn add_html(
    State(state): State<AppState>,
    Json(input): Json<AddHtmlRequest>,
) -> AppResult<Json<AddHtmlResponse>> {
    let (slug, html) = match (non_empty(input.slug), non_empty(input.html)) {
        (Some(slug), Some(html)) => (slug, html),
        _ => {
            return Err(AppError::BadRequest(
                "Missing required fields: slug and html".into(),
            ))
        }
    };

    let (page, action) = PageRepo::upsert_imported(
        &state.pool,
        &ImportPage {
            title: extract_title(&html),
            description: extract_description(&html),
            model: non_empty(input.model).unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
            prompt: non_empty(input.prompt).unwrap_or_else(|| UPLOADED_PROMPT.to_string()),
            slug,
            html,
        },
    )
    .await?;

    tracing::info!(id = page.id, slug = %page.slug, action = action.as_str(), "HTML page imported");

    Ok(Json(AddHtmlResponse {
        message: format!("HTML page {} successfully", action.as_str()),
        slug: page.slug,
        title: page.title,
        action: action.as_str().to_string(),
        model: page.model,
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportResult {
    /// Source file name; absent for built-in samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub slug: String,
    pub title: String,
    /// `created`, `updated` or `failed`.
    pub action: String,
    pub model: String,
    /// Why the file could not be imported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportFilesResponse {
    pub message: String,
    pub results: Vec<ImportResult>,
    pub note: String,
}

/// POST /add-test-files
///
/// Import every `*.html` file in the sample directory. A file that cannot be
/// read is reported as `failed` and the rest are still imported. When the
/// directory cannot be read, the built-in sample pages are imported instead.
#[utoipa::path(post, path = "/add-test-files", tag = "Admin",
    responses((status = 200, body = ImportFilesResponse)))]
pub async fn add_test_files(State(state): State<AppState>) -> AppResult<Json<ImportFilesResponse>> {
    let dir = state.config.sample_pages_dir.as_path();

    let files = match html_files(dir).await {
        Ok(files) => files,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "Sample directory unreadable, importing built-in samples");
            let results = import_builtin_samples(&state.pool).await?;
            return Ok(Json(ImportFilesResponse {
                message: format!("Successfully processed {} sample test files", results.len()),
                results,
                note: "Used built-in sample HTML - sample directory not readable".to_string(),
            }));
        }
    };

    let mut results = Vec::with_capacity(files.len());
    let mut imported = 0;
    for filename in files {
        let stem = filename.trim_end_matches(".html").to_string();
        let html = match tokio::fs::read_to_string(dir.join(&filename)).await {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(%filename, error = %err, "Skipping unreadable sample file");
                results.push(ImportResult {
                    slug: file_slug(&stem),
                    title: stem.clone(),
                    action: FAILED_ACTION.to_string(),
                    model: stem.replace('-', " "),
                    error: Some(err.to_string()),
                    filename: Some(filename),
                });
                continue;
            }
        };

        let (page, action) = PageRepo::upsert_imported(
            &state.pool,
            &ImportPage {
                slug: file_slug(&stem),
                title: extract_title(&html),
                description: extract_description(&html),
                model: stem.replace('-', " "),
                prompt: SAMPLE_PROMPT.to_string(),
                html,
            },
        )
        .await?;

        imported += 1;
        results.push(ImportResult {
            filename: Some(filename),
            slug: page.slug,
            title: page.title,
            action: action.as_str().to_string(),
            model: page.model,
            error: None,
        });
    }

    tracing::info!(
        dir = %dir.display(),
        imported,
        failed = results.len() - imported,
        "Imported sample files"
    );

    Ok(Json(ImportFilesResponse {
        message: format!("Successfully processed {imported} HTML files"),
        results,
        note: format!("Read HTML files from {}", dir.display()),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Names of the `*.html` files directly inside `dir`, sorted.
async fn html_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(".html") {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    Ok(files)
}

async fn import_builtin_samples(pool: &DbPool) -> AppResult<Vec<ImportResult>> {
    let mut results = Vec::with_capacity(SAMPLE_PAGES.len());
    for sample in SAMPLE_PAGES {
        let (page, action): (Page, ImportAction) = PageRepo::upsert_imported(
            pool,
            &ImportPage {
                slug: sample.slug.to_string(),
                html: sample.html(),
                prompt: SAMPLE_PROMPT.to_string(),
                model: sample.model.to_string(),
                title: sample.title.to_string(),
                description: sample.description.to_string(),
            },
        )
        .await?;

        results.push(ImportResult {
            filename: None,
            slug: page.slug,
            title: page.title,
            action: format!("{} (sample)", action.as_str()),
            model: page.model,
            error: None,
        });
    }
    Ok(results)
}
