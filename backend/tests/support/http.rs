//! Shared HTTP helpers for the in-memory API tests.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::test;
use blog_backend::domain::TRACE_ID_HEADER;
use blog_backend::test_support::session_cookie;
use serde_json::{Value, json};

pub(crate) const PASSWORD: &str = "correct horse battery";

/// Decoded response: status, `trace-id` header and JSON body
/// (`Value::Null` when empty).
pub(crate) struct Captured {
    pub(crate) status: StatusCode,
    pub(crate) trace_id: Option<String>,
    pub(crate) body: Value,
}

pub(crate) async fn send<S>(
    app: &S,
    method: Method,
    uri: &str,
    cookie: Option<&Cookie<'static>>,
    body: Option<Value>,
) -> Captured
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut req = test::TestRequest::default().method(method).uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    Captured {
        status,
        trace_id,
        body,
    }
}

/// Register `email`, log in and return the session cookie.
pub(crate) async fn sign_in<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let registered = send(
        app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({ "user": { "email": email, "password": PASSWORD } })),
    )
    .await;
    assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);

    let login = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": email, "password": PASSWORD }))
        .to_request();
    let res = test::call_service(app, login).await;
    assert_eq!(res.status(), StatusCode::OK);
    session_cookie(&res).expect("login sets a session cookie")
}
