//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie only carries the viewer id; the view state itself stays in the
//! process-wide [`crate::domain::ViewerRegistry`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, ViewerId};

pub(crate) const VIEWER_ID_KEY: &str = "viewer_id";

/// Newtype wrapper that exposes viewer-oriented session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Return the caller's viewer id, minting and persisting one if the
    /// session has none or holds a value that does not parse.
    pub fn viewer_id(&self) -> Result<ViewerId, Error> {
        let stored = self
            .0
            .get::<String>(VIEWER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        if let Some(raw) = stored {
            match ViewerId::parse(&raw) {
                Ok(id) => return Ok(id),
                Err(error) => warn!("invalid viewer id in session cookie: {error}"),
            }
        }

        let id = ViewerId::random();
        self.0
            .insert(VIEWER_ID_KEY, id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        Ok(id)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    async fn echo_viewer(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.viewer_id()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn viewer_id_is_stable_across_requests() {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route("/viewer", web::get().to(echo_viewer)),
        )
        .await;

        let first = test::call_service(&app, test::TestRequest::get().uri("/viewer").to_request())
            .await;
        assert_eq!(first.status(), StatusCode::OK);
        let cookie = session_cookie(&first);
        let first_id = test::read_body(first).await;

        let second = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/viewer")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let second_id = test::read_body(second).await;
        assert_eq!(first_id, second_id);
    }

    #[actix_web::test]
    async fn tampered_viewer_id_is_replaced() {
        let app = test::init_service(
            App::new()
                .wrap(crate::inbound::http::test_utils::test_session_middleware())
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(VIEWER_ID_KEY, "not-a-uuid")
                            .expect("set invalid viewer id");
                        HttpResponse::Ok()
                    }),
                )
                .route("/viewer", web::get().to(echo_viewer)),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/viewer")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let raw = std::str::from_utf8(&body).expect("utf8 body");
        assert!(ViewerId::parse(raw).is_ok());
    }
}
