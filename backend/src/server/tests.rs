//! Tests for server bootstrap: readiness, CORS and account seeding.

use super::*;
use actix_web::cookie::{Key, SameSite};
use actix_web::http::{Method, StatusCode};
use actix_web::test;
use blog_backend::domain::{LoginCredentials, Registration};
use blog_backend::test_support::in_memory_state;
use rstest::{fixture, rstest};

const ADMIN_ORIGIN: &str = "http://localhost:5173";

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

fn deps(health_state: web::Data<HealthState>, session: SessionSettings) -> AppDependencies {
    AppDependencies {
        health_state,
        http_state: web::Data::new(in_memory_state()),
        session,
        cors_origin: ADMIN_ORIGIN.to_owned(),
    }
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    session_settings: SessionSettings,
) {
    assert!(!health_state.is_ready(), "state should start unready");
    let bind_addr = "127.0.0.1:0".parse().expect("literal address");
    let config = ServerConfig::new(session_settings, bind_addr, ADMIN_ORIGIN);
    assert_eq!(config.bind_addr(), bind_addr);

    let _server = create_server(health_state.clone(), config)
        .await
        .expect("server should build without a database");

    assert!(health_state.is_ready(), "server creation should mark readiness");
}

#[rstest]
#[actix_web::test]
async fn preflight_allows_configured_origin_with_credentials(
    health_state: web::Data<HealthState>,
    session_settings: SessionSettings,
) {
    let app = test::init_service(build_app(deps(health_state, session_settings))).await;
    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/posts")
        .insert_header(("Origin", ADMIN_ORIGIN))
        .insert_header(("Access-Control-Request-Method", "PATCH"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(ADMIN_ORIGIN)
    );
    assert_eq!(
        headers
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[rstest]
#[actix_web::test]
async fn preflight_rejects_other_origins(
    health_state: web::Data<HealthState>,
    session_settings: SessionSettings,
) {
    let app = test::init_service(build_app(deps(health_state, session_settings))).await;
    let req = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/posts")
        .insert_header(("Origin", "https://evil.example.com"))
        .insert_header(("Access-Control-Request-Method", "DELETE"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert!(res.headers().get("access-control-allow-origin").is_none());
}

#[rstest]
#[actix_web::test]
async fn app_serves_api_and_probes(
    health_state: web::Data<HealthState>,
    session_settings: SessionSettings,
) {
    let app = test::init_service(build_app(deps(health_state.clone(), session_settings))).await;

    let probe = || test::TestRequest::get().uri("/health/ready").to_request();
    let res = test::call_service(&app, probe()).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

    health_state.mark_ready();
    let res = test::call_service(&app, probe()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("trace-id"));
}

#[rstest]
#[actix_web::test]
async fn ensure_admin_is_idempotent() {
    let state = in_memory_state();
    let admin = || Registration::new("admin@example.com", "bootstrap-password");

    ensure_admin(&state, admin()).await.expect("first bootstrap");
    ensure_admin(&state, admin()).await.expect("second bootstrap");

    let credentials = LoginCredentials::try_from_parts("admin@example.com", "bootstrap-password")
        .expect("credentials");
    let user = state
        .login
        .authenticate(&credentials)
        .await
        .expect("bootstrap account can log in");
    assert_eq!(user.email, "admin@example.com");
}

#[rstest]
#[actix_web::test]
async fn ensure_admin_rejects_invalid_credentials() {
    let state = in_memory_state();
    let result = ensure_admin(&state, Registration::new("not-an-email", "short")).await;
    assert!(result.is_err());
}
