//! Page model and DTOs.

use pagen_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A row from the `html_pages` table.
///
/// `html` is `None` until the page has been generated once.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Page {
    pub id: DbId,
    pub slug: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
    pub prompt: String,
    pub model: String,
    pub title: String,
    pub description: Option<String>,
    pub html: Option<String>,
}

/// Listing projection of a page (no prompt, no html).
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct PageSummary {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub model: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    pub description: Option<String>,
}

/// DTO for a submitted page awaiting generation.
#[derive(Debug, Clone)]
pub struct CreatePage {
    pub slug: String,
    pub prompt: String,
    pub model: String,
    pub title: String,
    pub description: Option<String>,
}

/// DTO for a page imported with ready-made HTML.
#[derive(Debug, Clone)]
pub struct ImportPage {
    pub slug: String,
    pub html: String,
    pub prompt: String,
    pub model: String,
    pub title: String,
    pub description: String,
}

/// Whether an import inserted a new row or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportAction {
    Created,
    Updated,
}

impl ImportAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportAction::Created => "created",
            ImportAction::Updated => "updated",
        }
    }
}
