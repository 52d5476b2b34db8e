//! Post handlers.
//!
//! ```text
//! GET    /api/posts
//! POST   /api/posts        {"post":{"title":"...","body":"...","category_id":1}}
//! GET    /api/posts/{id}
//! PUT    /api/posts/{id}   {"post":{"category_id":null}}
//! PATCH  /api/posts/{id}
//! DELETE /api/posts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, route, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{CategoryId, Post, PostChanges, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PostSchema};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::double_option;

/// Permitted post fields. Anything else in the body is ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PostPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    /// `null` clears the category; omit the key to keep it.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<Option<i64>>,
}

impl From<PostPayload> for PostChanges {
    fn from(value: PostPayload) -> Self {
        Self {
            title: value.title,
            body: value.body,
            category_id: value.category_id.map(|id| id.map(CategoryId::new)),
        }
    }
}

/// Request body wrapping [`PostPayload`] under `post`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostRequest {
    pub post: PostPayload,
}

impl PostRequest {
    fn into_changes(self) -> PostChanges {
        self.post.into()
    }
}

/// List every post, oldest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "All posts", body = [PostSchema]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts",
    security([])
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Post>>> {
    Ok(web::Json(state.posts_query.list_posts().await?))
}

/// Fetch one post.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = PostSchema),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost",
    security([])
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Post>> {
    let id = PostId::new(path.into_inner());
    Ok(web::Json(state.posts_query.get_post(id).await?))
}

/// Create a post.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Created post", body = PostSchema),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<PostRequest>,
) -> ApiResult<HttpResponse> {
    let post = state
        .posts_command
        .create_post(payload.into_inner().into_changes())
        .await?;
    Ok(HttpResponse::Created().json(post))
}

/// Update the fields present in the body; absent fields stay unchanged.
#[utoipa::path(
    method(put, patch),
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Updated post", body = PostSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[route("/posts/{id}", method = "PUT", method = "PATCH")]
pub async fn update_post(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PostRequest>,
) -> ApiResult<web::Json<Post>> {
    let id = PostId::new(path.into_inner());
    let post = state
        .posts_command
        .update_post(id, payload.into_inner().into_changes())
        .await?;
    Ok(web::Json(post))
}

/// Delete a post together with its comments.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .posts_command
        .delete_post(PostId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
