//! Port abstraction for comment persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Comment, CommentFields, CommentId, CommentWithPost, PostId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
    }
}

/// Storage for comments.
///
/// Lookups by comment id are always scoped to the parent post, so a comment
/// addressed through the wrong post is reported as absent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Every comment with its parent post, ordered by comment id.
    async fn list_with_posts(&self) -> Result<Vec<CommentWithPost>, CommentRepositoryError>;

    /// Comments of one post ordered by id.
    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Fetch a comment belonging to `post_id`.
    async fn find_for_post(
        &self,
        post_id: PostId,
        id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Insert a comment under `post_id`.
    async fn insert(
        &self,
        post_id: PostId,
        fields: &CommentFields,
        at: DateTime<Utc>,
    ) -> Result<Comment, CommentRepositoryError>;

    /// Overwrite the body and `updated_at` of a comment belonging to `post_id`.
    async fn update(
        &self,
        post_id: PostId,
        id: CommentId,
        fields: &CommentFields,
        at: DateTime<Utc>,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Delete a comment belonging to `post_id`.
    async fn delete(&self, post_id: PostId, id: CommentId) -> Result<bool, CommentRepositoryError>;
}
