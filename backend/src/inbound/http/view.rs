//! JSON view-state endpoints.
//!
//! ```text
//! GET  /api/v1/view
//! POST /api/v1/checks
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CreditRecord, Error, ViewPhase, ViewState};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for a credit check submission.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    /// Raw field text; blank values are accepted and surface as an error in
    /// the view state.
    #[schema(example = "aa@aa.com")]
    pub email: String,
}

/// A found record as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditRecordBody {
    /// Email as stored in the record set.
    #[schema(example = "aa@aa.com")]
    pub email: String,
    /// Display name.
    #[schema(example = "Alex Anderson")]
    pub name: String,
    /// `OK` or `NOT_OK`.
    #[schema(example = "OK")]
    pub credit_status: String,
}

impl From<&CreditRecord> for CreditRecordBody {
    fn from(record: &CreditRecord) -> Self {
        Self {
            email: record.email().to_string(),
            name: record.name().to_owned(),
            credit_status: record.credit_status().code().to_owned(),
        }
    }
}

/// Coarse phase of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PhaseBody {
    /// Nothing submitted yet.
    Idle,
    /// A lookup is pending.
    Loading,
    /// A record was found.
    Success,
    /// Blank query or unknown email.
    Error,
}

impl From<ViewPhase> for PhaseBody {
    fn from(phase: ViewPhase) -> Self {
        match phase {
            ViewPhase::Idle => Self::Idle,
            ViewPhase::Loading => Self::Loading,
            ViewPhase::Success => Self::Success,
            ViewPhase::Error => Self::Error,
        }
    }
}

/// Response payload mirroring a viewer's state.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewStateResponse {
    /// Text last entered in the email field.
    pub query_email: String,
    /// Record found by the last resolved lookup.
    pub result: Option<CreditRecordBody>,
    /// Message shown in the error banner.
    pub error_message: Option<String>,
    /// Whether a lookup is pending.
    pub is_loading: bool,
    /// Presentation derived from the other fields.
    pub phase: PhaseBody,
}

impl From<&ViewState> for ViewStateResponse {
    fn from(state: &ViewState) -> Self {
        Self {
            query_email: state.query_email().to_owned(),
            result: state.result().map(CreditRecordBody::from),
            error_message: state.error_message().map(str::to_owned),
            is_loading: state.is_loading(),
            phase: state.phase().into(),
        }
    }
}

/// JSON extractor settings for this scope.
///
/// Malformed or mistyped bodies are reported as [`Error::invalid_request`]
/// so clients receive the same error envelope as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON payload: {err}")).into()
    })
}

/// Fetch the caller's view state.
#[utoipa::path(
    get,
    path = "/api/v1/view",
    description = "Current view state for the caller's session.",
    responses(
        (status = 200, description = "View state", body = ViewStateResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["checks"],
    operation_id = "getViewState"
)]
#[get("/view")]
pub async fn get_view(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let view = state.controller(&session)?.snapshot();
    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "private, no-cache"))
        .json(ViewStateResponse::from(&view)))
}

/// Submit an email for checking.
#[utoipa::path(
    post,
    path = "/api/v1/checks",
    description = "Apply a submission. Blank emails are rejected in the view state; \
                   others start a delayed lookup.",
    request_body = CheckRequest,
    responses(
        (status = 202, description = "Submission applied", body = ViewStateResponse),
        (status = 400, description = "Malformed payload", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["checks"],
    operation_id = "submitCheck"
)]
#[post("/checks")]
pub async fn submit_check(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CheckRequest>,
) -> ApiResult<HttpResponse> {
    let controller = state.controller(&session)?;
    let _submission = controller.submit(&payload.email);
    Ok(HttpResponse::Accepted().json(ViewStateResponse::from(&controller.snapshot())))
}
