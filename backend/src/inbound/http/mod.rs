//! HTTP inbound adapter exposing the blog REST endpoints.
//!
//! [`configure`] mounts every `/api` route; the server adds the session and
//! trace middleware, CORS and the health probes around it.

pub mod categories;
pub mod comments;
pub mod error;
pub mod health;
pub mod posts;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` scope with its extractor configuration.
///
/// Handlers expect `web::Data<HttpState>` and a session middleware to be
/// installed by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(validation::json_config())
            .app_data(validation::path_config())
            .service(users::login)
            .service(users::logout)
            .service(users::current_user)
            .service(users::register)
            .service(posts::list_posts)
            .service(posts::create_post)
            .service(posts::get_post)
            .service(posts::update_post)
            .service(posts::delete_post)
            .service(comments::list_all_comments)
            .service(comments::list_comments)
            .service(comments::create_comment)
            .service(comments::get_comment)
            .service(comments::update_comment)
            .service(comments::delete_comment)
            .service(categories::list_categories)
            .service(categories::create_category)
            .service(categories::get_category)
            .service(categories::update_category)
            .service(categories::delete_category),
    );
}
