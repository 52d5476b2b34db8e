//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::session_config::SESSION_COOKIE_NAME;
use super::state::HttpState;
use crate::middleware::Trace;

/// Build a session middleware configured for tests.
///
/// Uses a fresh key per invocation and the production cookie name, with the
/// `Secure` flag off so plain HTTP test clients send the cookie back.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// Full API application over `state`, as the server wires it minus CORS.
pub fn api_test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .wrap(Trace)
        .configure(super::configure)
}

/// The session cookie set on `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Register `email` through the API, log in and return the session cookie.
#[cfg(test)]
pub(crate) async fn sign_in(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
) -> Cookie<'static> {
    use actix_web::test;
    use serde_json::json;

    let password = "correct horse battery";
    let register = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "user": { "email": email, "password": password } }))
        .to_request();
    let res = test::call_service(app, register).await;
    assert!(res.status().is_success(), "registration failed: {}", res.status());

    let login = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let res = test::call_service(app, login).await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    session_cookie(&res).expect("login sets a session cookie")
}

/// Send a JSON request and return the status with the decoded body
/// (`Value::Null` for empty bodies).
#[cfg(test)]
pub(crate) async fn send(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
    method: actix_web::http::Method,
    uri: &str,
    cookie: Option<&Cookie<'static>>,
    body: Option<serde_json::Value>,
) -> (actix_web::http::StatusCode, serde_json::Value) {
    use actix_web::test;

    let mut req = test::TestRequest::default().method(method).uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let bytes = test::read_body(res).await;
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, value)
}
