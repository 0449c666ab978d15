//! Server-rendered form handlers.
//!
//! ```text
//! GET  /
//! POST /check
//! ```
//!
//! The page reflects the caller's current view state. Submitting the form
//! applies the submission and redirects back to the page (post/redirect/get).

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::inbound::http::ApiResult;
use crate::inbound::http::html::render_page;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const NO_STORE: &str = "no-store";

/// Form body posted by the page.
#[derive(Debug, Deserialize)]
pub struct CheckForm {
    /// Raw field text; a missing field counts as blank.
    #[serde(default)]
    pub email: String,
}

/// Render the page for the caller's session.
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let view = state.controller(&session)?.snapshot();
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, NO_STORE))
        .body(render_page(&view)))
}

/// Apply a form submission and redirect back to the page.
#[post("/check")]
pub async fn submit_check(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CheckForm>,
) -> ApiResult<HttpResponse> {
    let controller = state.controller(&session)?;
    // The pending handle is dropped; the page polls until the lookup lands.
    let _submission = controller.submit(&form.email);
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}
