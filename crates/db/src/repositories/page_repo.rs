//! Repository for the `html_pages` table.

use chrono::Utc;
use pagen_core::types::DbId;

use crate::models::page::{CreatePage, ImportAction, ImportPage, Page, PageSummary};
use crate::DbPool;

const COLUMNS: &str = "id, slug, created_at, updated_at, prompt, model, title, description, html";

const SUMMARY_COLUMNS: &str = "id, slug, title, model, created_at, description";

/// Provides CRUD operations for pages.
pub struct PageRepo;

impl PageRepo {
    /// Insert a submitted page with `html = NULL`, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreatePage) -> Result<Page, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO html_pages \
                (slug, created_at, updated_at, prompt, model, title, description, html) \
             VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6, NULL) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(&input.slug)
            .bind(now)
            .bind(&input.prompt)
            .bind(&input.model)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a page by ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM html_pages WHERE id = ?1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a page by its unique slug.
    pub async fn find_by_slug(pool: &DbPool, slug: &str) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM html_pages WHERE slug = ?1");
        sqlx::query_as::<_, Page>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List every page, oldest first.
    pub async fn list(pool: &DbPool) -> Result<Vec<PageSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM html_pages ORDER BY id ASC");
        sqlx::query_as::<_, PageSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Store freshly generated HTML and refresh `updated_at`.
    ///
    /// Only a page that has no HTML yet is written, so `html` goes from
    /// `NULL` to a value at most once. Returns `false` when nothing was
    /// written (unknown id, or another request stored HTML first).
    pub async fn set_generated_html(
        pool: &DbPool,
        id: DbId,
        html: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE html_pages SET html = ?2, updated_at = ?3 \
             WHERE id = ?1 AND html IS NULL",
        )
        .bind(id)
        .bind(html)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Insert an imported page, or replace the page holding the same slug.
    ///
    /// `created_at` is kept on update.
    pub async fn upsert_imported(
        pool: &DbPool,
        input: &ImportPage,
    ) -> Result<(Page, ImportAction), sqlx::Error> {
        let now = Utc::now();

        if Self::find_by_slug(pool, &input.slug).await?.is_some() {
            let query = format!(
                "UPDATE html_pages SET \
                    updated_at = ?2, prompt = ?3, model = ?4, \
                    title = ?5, description = ?6, html = ?7 \
                 WHERE slug = ?1 \
                 RETURNING {COLUMNS}"
            );
            let page = sqlx::query_as::<_, Page>(&query)
                .bind(&input.slug)
                .bind(now)
                .bind(&input.prompt)
                .bind(&input.model)
                .bind(&input.title)
                .bind(&input.description)
                .bind(&input.html)
                .fetch_one(pool)
                .await?;
            return Ok((page, ImportAction::Updated));
        }

        let query = format!(
            "INSERT INTO html_pages \
                (slug, created_at, updated_at, prompt, model, title, description, html) \
             VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6, ?7) \
             RETURNING {COLUMNS}"
        );
        let page = sqlx::query_as::<_, Page>(&query)
            .bind(&input.slug)
            .bind(now)
            .bind(&input.prompt)
            .bind(&input.model)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.html)
            .fetch_one(pool)
            .await?;
        Ok((page, ImportAction::Created))
    }

    /// Delete every page. Returns the number of rows removed.
    pub async fn delete_all(pool: &DbPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM html_pages").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
