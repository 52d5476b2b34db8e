//! End-to-end properties of the blog API over the in-memory stack.
//!
//! Each test drives the full application (session, trace middleware and
//! every `/api` route) the way the admin client does.

#[path = "support/http.rs"]
mod http;

use actix_web::http::{Method, StatusCode};
use actix_web::test;
use blog_backend::test_support::{api_test_app, in_memory_state};
use http::{PASSWORD, send, sign_in};
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case("short", json!(["Body is too short (minimum is 10 characters)"]))]
#[case("123456789", json!(["Body is too short (minimum is 10 characters)"]))]
#[actix_web::test]
async fn short_post_bodies_fail_with_the_length_rule(#[case] body: &str, #[case] expected: Value) {
    let app = test::init_service(api_test_app(in_memory_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let res = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&cookie),
        Some(json!({ "post": { "title": "Hello", "body": body } })),
    )
    .await;

    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.body["errors"], expected);
    assert_eq!(res.body["code"], "validation_failed");
}

#[rstest]
#[case("1234567890")]
#[case("A body comfortably past ten characters")]
#[actix_web::test]
async fn titled_posts_with_long_enough_bodies_succeed(#[case] body: &str) {
    let app = test::init_service(api_test_app(in_memory_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let res = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&cookie),
        Some(json!({ "post": { "title": "Hello", "body": body } })),
    )
    .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["body"], body);
}

#[rstest]
#[actix_web::test]
async fn deleting_a_post_leaves_no_comments_behind() {
    let app = test::init_service(api_test_app(in_memory_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;
    for title in ["Doomed", "Kept"] {
        send(
            &app,
            Method::POST,
            "/api/posts",
            Some(&cookie),
            Some(json!({ "post": { "title": title, "body": "Long enough body" } })),
        )
        .await;
    }
    for (post, body) in [(1, "one"), (1, "two"), (2, "three")] {
        let res = send(
            &app,
            Method::POST,
            &format!("/api/posts/{post}/comments"),
            Some(&cookie),
            Some(json!({ "comment": { "body": body } })),
        )
        .await;
        assert_eq!(res.status, StatusCode::CREATED);
    }

    let res = send(&app, Method::DELETE, "/api/posts/1", Some(&cookie), None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let all = send(&app, Method::GET, "/api/comments", None, None).await;
    let bodies: Vec<&str> = all
        .body
        .as_array()
        .expect("comment list")
        .iter()
        .filter_map(|comment| comment["body"].as_str())
        .collect();
    assert_eq!(bodies, ["three"]);
    assert_eq!(all.body[0]["post"]["title"], "Kept");

    let nested = send(&app, Method::GET, "/api/posts/1/comments", None, None).await;
    assert_eq!(nested.status, StatusCode::OK);
    assert_eq!(nested.body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn comments_under_a_missing_post_are_not_found() {
    let app = test::init_service(api_test_app(in_memory_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let res = send(
        &app,
        Method::POST,
        "/api/posts/42/comments",
        Some(&cookie),
        Some(json!({ "comment": { "body": "Hello?" } })),
    )
    .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Couldn't find Post with 'id'=42");
}

#[rstest]
#[actix_web::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let app = test::init_service(api_test_app(in_memory_state())).await;
    sign_in(&app, "ada@example.com").await;

    let wrong_password = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "not the password" })),
    )
    .await;
    let unknown_email = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": PASSWORD })),
    )
    .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status, unknown_email.status);
    let strip_trace = |mut body: Value| {
        if let Some(map) = body.as_object_mut() {
            map.remove("traceId");
        }
        body
    };
    assert_eq!(strip_trace(wrong_password.body), strip_trace(unknown_email.body));
}

#[rstest]
#[actix_web::test]
async fn duplicate_category_names_fail_uniqueness() {
    let app = test::init_service(api_test_app(in_memory_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;
    let category = json!({ "category": { "name": "Rust" } });

    let first = send(&app, Method::POST, "/api/categories", Some(&cookie), Some(category.clone())).await;
    assert_eq!(first.status, StatusCode::CREATED);
    let second = send(&app, Method::POST, "/api/categories", Some(&cookie), Some(category)).await;

    assert_eq!(second.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(second.body["errors"], json!(["Name has already been taken"]));
}

#[rstest]
#[case(Method::PUT)]
#[case(Method::PATCH)]
#[actix_web::test]
async fn title_only_updates_keep_the_body(#[case] method: Method) {
    let app = test::init_service(api_test_app(in_memory_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;
    send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&cookie),
        Some(json!({ "post": { "title": "Old", "body": "The original body" } })),
    )
    .await;

    let res = send(
        &app,
        method,
        "/api/posts/1",
        Some(&cookie),
        Some(json!({ "post": { "title": "New" } })),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["title"], "New");
    assert_eq!(res.body["body"], "The original body");
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let app = test::init_service(api_test_app(in_memory_state())).await;

    let listed = send(&app, Method::GET, "/api/posts", None, None).await;
    let rejected = send(
        &app,
        Method::POST,
        "/api/posts",
        None,
        Some(json!({ "post": { "title": "Hi" } })),
    )
    .await;

    assert!(listed.trace_id.is_some());
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected.body["error"], "Login required");
    assert_eq!(
        rejected.body["traceId"].as_str(),
        rejected.trace_id.as_deref()
    );
}

#[rstest]
#[actix_web::test]
async fn logout_ends_write_access() {
    let app = test::init_service(api_test_app(in_memory_state())).await;
    let cookie = sign_in(&app, "ada@example.com").await;

    let me = send(&app, Method::GET, "/api/me", Some(&cookie), None).await;
    assert_eq!(me.body["user"]["email"], "ada@example.com");
    assert!(me.body["user"].get("password").is_none());

    let logout = test::TestRequest::post()
        .uri("/api/logout")
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, logout).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = blog_backend::test_support::session_cookie(&res).expect("removal cookie");

    let write = send(
        &app,
        Method::POST,
        "/api/categories",
        Some(&cleared),
        Some(json!({ "category": { "name": "Rust" } })),
    )
    .await;
    assert_eq!(write.status, StatusCode::UNAUTHORIZED);
}
