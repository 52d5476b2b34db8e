//! Port abstraction for post persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Post, PostFields, PostId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// The referenced category was gone when the write reached storage.
        MissingCategory => "post references a category that no longer exists",
    }
}

/// Storage for posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts ordered by id.
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Fetch one post.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Insert a post stamped with `at` for both timestamps.
    async fn insert(
        &self,
        fields: &PostFields,
        at: DateTime<Utc>,
    ) -> Result<Post, PostRepositoryError>;

    /// Overwrite the editable fields and `updated_at`.
    ///
    /// Returns `None` when the post no longer exists.
    async fn update(
        &self,
        id: PostId,
        fields: &PostFields,
        at: DateTime<Utc>,
    ) -> Result<Option<Post>, PostRepositoryError>;

    /// Delete a post and all of its comments atomically.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError>;
}
