//! Comment handlers, nested under their parent post.
//!
//! ```text
//! GET    /api/comments                       every comment with its post
//! GET    /api/posts/{post_id}/comments
//! POST   /api/posts/{post_id}/comments       {"comment":{"body":"..."}}
//! GET    /api/posts/{post_id}/comments/{id}
//! PUT    /api/posts/{post_id}/comments/{id}
//! PATCH  /api/posts/{post_id}/comments/{id}
//! DELETE /api/posts/{post_id}/comments/{id}
//! ```
//!
//! A comment id is only resolved through its own post; pairing it with any
//! other post id answers `404`.

use actix_web::{HttpResponse, delete, get, post, route, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Comment, CommentChanges, CommentId, CommentWithPost, PostId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CommentSchema, CommentWithPostSchema, ErrorSchema};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Permitted comment fields.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CommentPayload {
    pub body: Option<String>,
}

/// Request body wrapping [`CommentPayload`] under `comment`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub comment: CommentPayload,
}

impl From<CommentRequest> for CommentChanges {
    fn from(value: CommentRequest) -> Self {
        Self {
            body: value.comment.body,
        }
    }
}

fn ids(path: web::Path<(i64, i64)>) -> (PostId, CommentId) {
    let (post_id, id) = path.into_inner();
    (PostId::new(post_id), CommentId::new(id))
}

/// List every comment, each with its parent post.
#[utoipa::path(
    get,
    path = "/api/comments",
    responses(
        (status = 200, description = "All comments", body = [CommentWithPostSchema]),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listAllComments",
    security([])
)]
#[get("/comments")]
pub async fn list_all_comments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CommentWithPost>>> {
    Ok(web::Json(state.comments_query.list_all_comments().await?))
}

/// List the comments of one post.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}/comments",
    params(("post_id" = i64, Path, description = "Parent post id")),
    responses(
        (status = 200, description = "Comments of the post; empty once the post is deleted", body = [CommentSchema])
    ),
    tags = ["comments"],
    operation_id = "listComments",
    security([])
)]
#[get("/posts/{post_id}/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<Comment>>> {
    let post_id = PostId::new(path.into_inner());
    Ok(web::Json(state.comments_query.list_comments(post_id).await?))
}

/// Fetch one comment through its parent post.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}/comments/{id}",
    params(
        ("post_id" = i64, Path, description = "Parent post id"),
        ("id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "The comment", body = CommentSchema),
        (status = 404, description = "No such post or comment", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "getComment",
    security([])
)]
#[get("/posts/{post_id}/comments/{id}")]
pub async fn get_comment(
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<web::Json<Comment>> {
    let (post_id, id) = ids(path);
    Ok(web::Json(state.comments_query.get_comment(post_id, id).await?))
}

/// Add a comment to a post.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/comments",
    params(("post_id" = i64, Path, description = "Parent post id")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Created comment", body = CommentSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/posts/{post_id}/comments")]
pub async fn create_comment(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let post_id = PostId::new(path.into_inner());
    let comment = state
        .comments_command
        .create_comment(post_id, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(comment))
}

/// Update a comment's body.
#[utoipa::path(
    method(put, patch),
    path = "/api/posts/{post_id}/comments/{id}",
    params(
        ("post_id" = i64, Path, description = "Parent post id"),
        ("id" = i64, Path, description = "Comment id")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Updated comment", body = CommentSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such post or comment", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[route("/posts/{post_id}/comments/{id}", method = "PUT", method = "PATCH")]
pub async fn update_comment(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<web::Json<Comment>> {
    let (post_id, id) = ids(path);
    let comment = state
        .comments_command
        .update_comment(post_id, id, payload.into_inner().into())
        .await?;
    Ok(web::Json(comment))
}

/// Delete a comment.
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/comments/{id}",
    params(
        ("post_id" = i64, Path, description = "Parent post id"),
        ("id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such post or comment", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/posts/{post_id}/comments/{id}")]
pub async fn delete_comment(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (post_id, id) = ids(path);
    state.comments_command.delete_comment(post_id, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "comments_tests.rs"]
mod tests;
