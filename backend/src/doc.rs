//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] describes the JSON mirror of the page and the health probes.
//! The HTML routes are left out; they return markup, not API payloads. The
//! document backs Swagger UI in debug builds and the `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::view::{CheckRequest, CreditRecordBody, PhaseBody, ViewStateResponse};

/// Registers the session cookie that scopes every view to one browser.
struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Issued on the first request; identifies the viewer whose state is returned.",
            ))),
        );
    }
}

/// OpenAPI document for the JSON API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "ConCreds API",
        description = "Conceptual credit checks against a fixed record set, one view per session."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::view::get_view,
        crate::inbound::http::view::submit_check,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ViewStateResponse,
        CreditRecordBody,
        PhaseBody,
        CheckRequest,
        Error,
        ErrorCode
    )),
    tags(
        (name = "checks", description = "Credit check submissions and view state"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
