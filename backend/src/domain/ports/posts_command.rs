//! Driving port for post writes.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostChanges, PostId};

/// Domain use-case port for creating, updating and deleting posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a post from the permitted fields; absent fields start blank.
    async fn create_post(&self, changes: PostChanges) -> Result<Post, Error>;

    /// Apply the permitted fields to an existing post.
    async fn update_post(&self, id: PostId, changes: PostChanges) -> Result<Post, Error>;

    /// Delete a post and its comments.
    async fn delete_post(&self, id: PostId) -> Result<(), Error>;
}
