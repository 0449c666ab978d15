//! Tests for server bootstrap: readiness signalling and middleware wiring.

use super::*;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test;
use concreds::domain::{CheckSettings, TRACE_ID_HEADER};
use concreds::inbound::http::session_config::SessionSettings;
use rstest::{fixture, rstest};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn config() -> ServerConfig {
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    let bind_addr = "127.0.0.1:0".parse().expect("literal address");
    ServerConfig::new(session, bind_addr).with_check_settings(CheckSettings {
        lookup_delay: Duration::ZERO,
        ..CheckSettings::default()
    })
}

fn deps(health_state: web::Data<HealthState>, config: &ServerConfig) -> AppDependencies {
    AppDependencies {
        health_state,
        http_state: build_http_state(config).expect("sample state"),
        key: config.key.clone(),
        cookie_secure: config.cookie_secure,
        same_site: config.same_site,
    }
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
#[actix_web::test]
async fn page_is_traced_and_issues_a_session(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    let app = test::init_service(build_app(deps(health_state, &config))).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie");
    assert_eq!(cookie.http_only(), Some(true));
}

#[rstest]
#[actix_web::test]
async fn probes_and_api_are_mounted(health_state: web::Data<HealthState>, config: ServerConfig) {
    health_state.mark_ready();
    let app = test::init_service(build_app(deps(health_state, &config))).await;

    for uri in ["/health/ready", "/health/live", "/api/v1/view"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
    }
}

#[rstest]
#[actix_web::test]
async fn malformed_check_body_returns_error_envelope(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    let app = test::init_service(build_app(deps(health_state, &config))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/checks")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"email":"#)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}
