//! Driving port for post reads.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostId};

/// Domain use-case port for reading posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// All posts ordered by id.
    async fn list_posts(&self) -> Result<Vec<Post>, Error>;

    /// One post or a not-found error.
    async fn get_post(&self, id: PostId) -> Result<Post, Error>;
}
