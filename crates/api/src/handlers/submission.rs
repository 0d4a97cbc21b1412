//! Handlers for page submission.
//!
//! A submission only records the prompt. Nothing is generated until the
//! page is first requested at `/gen/{id}`.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::{HeaderName, StatusCode};
use axum::{Form, Json};
use pagen_core::prompt::{self, CharacterBrief};
use pagen_core::slug::page_slug;
use pagen_core::types::DbId;
use pagen_db::models::page::{CreatePage, Page};
use pagen_db::repositories::PageRepo;
use pagen_llm::ModelCatalog;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppResult;
use crate::state::AppState;

/// Fields accepted by both submission endpoints.
///
/// Missing text fields deserialize as empty strings so they are reported
/// per field by validation rather than as a malformed body.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubmitPageRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "character_name must not be empty"))]
    pub character_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "character_setting must not be empty"))]
    pub character_setting: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "webpage_title must not be empty"))]
    pub webpage_title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "character_comment must not be empty"))]
    pub character_comment: String,
    /// Short model name. Defaults to the configured default model.
    #[serde(default)]
    pub model: Option<String>,
}

impl SubmitPageRequest {
    fn brief(&self) -> CharacterBrief {
        CharacterBrief {
            character_name: self.character_name.clone(),
            character_setting: self.character_setting.clone(),
            webpage_title: self.webpage_title.clone(),
            character_comment: self.character_comment.clone(),
        }
    }

    /// Validate the text fields and the model name, returning the model to
    /// record.
    fn validated_model(&self, catalog: &ModelCatalog) -> Result<String, ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let model = match self.model.as_deref() {
            None => catalog.default_model(),
            Some(name) if catalog.contains(name) => name,
            Some(name) => {
                let names: Vec<&str> = catalog.names().collect();
                errors.add(
                    "model",
                    ValidationError::new("unknown_model").with_message(
                        format!("unknown model '{name}', expected one of: {}", names.join(", "))
                            .into(),
                    ),
                );
                ""
            }
        };

        if errors.is_empty() {
            Ok(model.to_string())
        } else {
            Err(errors)
        }
    }
}

/// Body returned by `POST /submit-page`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitPageResponse {
    pub message: String,
    pub id: DbId,
    /// Relative URL that serves (and on first visit generates) the page.
    pub url: String,
}

/// Path at which a page is served.
pub fn page_url(id: DbId) -> String {
    format!("/gen/{id}")
}

/// POST /submit-page
///
/// Record a page request from JSON and return its id. The page is generated
/// on the first visit to the returned URL.
#[utoipa::path(post, path = "/submit-page", tag = "Pages",
    request_body = SubmitPageRequest,
    responses(
        (status = 200, body = SubmitPageResponse),
        (status = 400, description = "Empty field or unknown model"),
    ))]
pub async fn submit_page(
    State(state): State<AppState>,
    Json(input): Json<SubmitPageRequest>,
) -> AppResult<Json<SubmitPageResponse>> {
    let model = input.validated_model(state.generator.catalog())?;
    let page = create_page(&state, &input, model, prompt::json_prompt(&input.brief())).await?;

    Ok(Json(SubmitPageResponse {
        message: "Page submission successful".to_string(),
        id: page.id,
        url: page_url(page.id),
    }))
}

/// POST /submit-page-form
///
/// Record a page request from a form and redirect to its URL, which starts
/// generation right away. The `model` field is ignored; form submissions
/// always use the default model.
#[utoipa::path(post, path = "/submit-page-form", tag = "Pages",
    request_body(content = SubmitPageRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect to /gen/{id}"),
        (status = 400, description = "Empty field"),
    ))]
pub async fn submit_page_form(
    State(state): State<AppState>,
    Form(input): Form<SubmitPageRequest>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1])> {
    input.validate()?;
    let model = state.generator.catalog().default_model().to_string();
    let page = create_page(&state, &input, model, prompt::form_prompt(&input.brief())).await?;

    Ok((StatusCode::FOUND, [(LOCATION, page_url(page.id))]))
}

async fn create_page(
    state: &AppState,
    input: &SubmitPageRequest,
    model: String,
    prompt: String,
) -> AppResult<Page> {
    let page = PageRepo::create(
        &state.pool,
        &CreatePage {
            slug: page_slug(&input.character_name),
            prompt,
            model,
            title: input.webpage_title.clone(),
            description: Some(prompt::page_description(&input.character_name)),
        },
    )
    .await?;

    tracing::info!(id = page.id, slug = %page.slug, model = %page.model, "Page submitted");
    Ok(page)
}
