//! Driving port for comment writes.

use async_trait::async_trait;

use crate::domain::{Comment, CommentChanges, CommentId, Error, PostId};

/// Domain use-case port for comment writes, scoped to a parent post.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Add a comment to an existing post.
    async fn create_comment(
        &self,
        post_id: PostId,
        changes: CommentChanges,
    ) -> Result<Comment, Error>;

    /// Update a comment of `post_id`.
    async fn update_comment(
        &self,
        post_id: PostId,
        id: CommentId,
        changes: CommentChanges,
    ) -> Result<Comment, Error>;

    /// Delete a comment of `post_id`.
    async fn delete_comment(&self, post_id: PostId, id: CommentId) -> Result<(), Error>;
}
