//! Driving port for comment reads.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, CommentWithPost, Error, PostId};

/// Domain use-case port for reading comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// Every comment with its parent post.
    async fn list_all_comments(&self) -> Result<Vec<CommentWithPost>, Error>;

    /// Comments of one post; not-found when the post is absent.
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, Error>;

    /// One comment resolved through its parent post.
    async fn get_comment(&self, post_id: PostId, id: CommentId) -> Result<Comment, Error>;
}
