//! Comment use-cases.
//!
//! Writes and single-comment reads first resolve the parent post, so an
//! unknown post reports the post as missing rather than the comment.
//! Listings never fail on a missing post: a deleted post simply has no
//! comments left.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::posts_service::map_post_repository_error;
use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, CommentsCommand, CommentsQuery, PostRepository,
};
use crate::domain::{
    Comment, CommentChanges, CommentFields, CommentId, CommentWithPost, Error, PostId, not_found,
};

fn map_comment_repository_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
    }
}

/// Comment service implementing the comment driving ports.
#[derive(Clone)]
pub struct CommentsService<C, P> {
    comment_repo: Arc<C>,
    post_repo: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<C, P> CommentsService<C, P> {
    /// Create a service over the comment and post repositories.
    pub fn new(comment_repo: Arc<C>, post_repo: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            comment_repo,
            post_repo,
            clock,
        }
    }
}

impl<C, P> CommentsService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    async fn require_post(&self, post_id: PostId) -> Result<(), Error> {
        self.post_repo
            .find_by_id(post_id)
            .await
            .map_err(map_post_repository_error)?
            .map(|_| ())
            .ok_or_else(|| not_found("Post", post_id))
    }

    async fn load(&self, post_id: PostId, id: CommentId) -> Result<Comment, Error> {
        self.require_post(post_id).await?;
        self.comment_repo
            .find_for_post(post_id, id)
            .await
            .map_err(map_comment_repository_error)?
            .ok_or_else(|| not_found("Comment", id))
    }
}

#[async_trait]
impl<C, P> CommentsCommand for CommentsService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    async fn create_comment(
        &self,
        post_id: PostId,
        changes: CommentChanges,
    ) -> Result<Comment, Error> {
        self.require_post(post_id).await?;
        let fields = changes.apply(CommentFields::default());
        fields.violations().into_result()?;
        let comment = self
            .comment_repo
            .insert(post_id, &fields, self.clock.utc())
            .await
            .map_err(map_comment_repository_error)?;
        debug!(post_id = %post_id, comment_id = %comment.id, "comment created");
        Ok(comment)
    }

    async fn update_comment(
        &self,
        post_id: PostId,
        id: CommentId,
        changes: CommentChanges,
    ) -> Result<Comment, Error> {
        let existing = self.load(post_id, id).await?;
        let fields = changes.apply(existing.fields);
        fields.violations().into_result()?;
        self.comment_repo
            .update(post_id, id, &fields, self.clock.utc())
            .await
            .map_err(map_comment_repository_error)?
            .ok_or_else(|| not_found("Comment", id))
    }

    async fn delete_comment(&self, post_id: PostId, id: CommentId) -> Result<(), Error> {
        self.require_post(post_id).await?;
        let deleted = self
            .comment_repo
            .delete(post_id, id)
            .await
            .map_err(map_comment_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(not_found("Comment", id))
        }
    }
}

#[async_trait]
impl<C, P> CommentsQuery for CommentsService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    async fn list_all_comments(&self) -> Result<Vec<CommentWithPost>, Error> {
        self.comment_repo
            .list_with_posts()
            .await
            .map_err(map_comment_repository_error)
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, Error> {
        self.comment_repo
            .list_for_post(post_id)
            .await
            .map_err(map_comment_repository_error)
    }

    async fn get_comment(&self, post_id: PostId, id: CommentId) -> Result<Comment, Error> {
        self.load(post_id, id).await
    }
}

#[cfg(test)]
#[path = "comments_service_tests.rs"]
mod tests;
