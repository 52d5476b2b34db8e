//! Domain primitives, ports and services.
//!
//! Purpose: define the blog's records, their validation rules and the
//! use-cases that inbound adapters drive. Nothing here imports actix, Diesel
//! or any adapter module.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic failure payload.
//! - `Post`, `Comment`, `Category`, `User`: stored records.
//! - `*Fields`/`*Changes`: editable fields and partial updates.
//! - `ports`: driving and driven port traits.
//! - `*Service`: use-case implementations over the driven ports.

pub mod accounts_service;
pub mod auth;
pub mod categories_service;
pub mod category;
pub mod comment;
pub mod comments_service;
pub mod error;
pub mod ports;
pub mod post;
pub mod posts_service;
pub mod record_id;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::accounts_service::AccountsService;
pub use self::auth::{INVALID_CREDENTIALS, LoginCredentials, LoginValidationError};
pub use self::categories_service::CategoriesService;
pub use self::category::{CATEGORY_NAME_TAKEN, Category, CategoryChanges, CategoryFields};
pub use self::comment::{Comment, CommentChanges, CommentFields, CommentWithPost};
pub use self::comments_service::CommentsService;
pub use self::error::{Error, ErrorCode, VALIDATION_FAILED_MESSAGE};
pub use self::post::{CATEGORY_MUST_EXIST, POST_BODY_MIN_CHARS, Post, PostChanges, PostFields};
pub use self::posts_service::PostsService;
pub use self::record_id::{CategoryId, CommentId, PostId, UserId};
pub use self::trace_id::TraceId;
pub use self::user::{
    EMAIL_TAKEN, Email, EmailError, NewUser, PASSWORD_MIN_CHARS, PasswordHash, Registration,
    StoredUser, User,
};
pub use self::validation::Violations;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Message for writes attempted without a session.
pub const LOGIN_REQUIRED: &str = "Login required";

/// Not-found message naming the record kind and identifier.
pub(crate) fn not_found(kind: &str, id: impl std::fmt::Display) -> Error {
    Error::not_found(format!("Couldn't find {kind} with 'id'={id}"))
}
