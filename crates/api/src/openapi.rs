//! OpenAPI document generated with `utoipa`.
//!
//! Every documented handler and schema is registered in [`ApiDoc`], which
//! is served at `/openapi.json`.

use utoipa::OpenApi;

use crate::handlers::{admin, generation, submission};
use crate::routes::health;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pagen",
        version = env!("CARGO_PKG_VERSION"),
        description = "Character page generator: submit a character brief, then fetch the page, which is generated by a language model on first request"
    ),
    paths(
        health::health_check,
        // Pages
        submission::submit_page,
        submission::submit_page_form,
        generation::serve_page,
        // Admin
        admin::list_pages,
        admin::clear_pages,
        admin::add_html,
        admin::add_test_files,
    ),
    components(schemas(
        submission::SubmitPageRequest,
        submission::SubmitPageResponse,
        admin::PageListItem,
        admin::PageListResponse,
        admin::ClearResponse,
        admin::AddHtmlRequest,
        admin::AddHtmlResponse,
        admin::ImportResult,
        admin::ImportFilesResponse,
    )),
    tags(
        (name = "Pages", description = "Submit and serve generated pages"),
        (name = "Admin", description = "Maintenance of stored pages, no generation"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
