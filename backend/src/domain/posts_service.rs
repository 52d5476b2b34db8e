//! Post use-cases.
//!
//! A post may only reference a category that exists; the check runs
//! alongside the field rules so all messages are reported together.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::categories_service::map_category_repository_error;
use crate::domain::ports::{
    CategoryRepository, PostRepository, PostRepositoryError, PostsCommand, PostsQuery,
};
use crate::domain::{CATEGORY_MUST_EXIST, Error, Post, PostChanges, PostFields, PostId, not_found};

pub(crate) fn map_post_repository_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
        PostRepositoryError::MissingCategory => {
            Error::validation(vec![CATEGORY_MUST_EXIST.to_owned()])
        }
    }
}

/// Post service implementing the post driving ports.
#[derive(Clone)]
pub struct PostsService<P, C> {
    post_repo: Arc<P>,
    category_repo: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<P, C> PostsService<P, C> {
    /// Create a service over the post and category repositories.
    pub fn new(post_repo: Arc<P>, category_repo: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            post_repo,
            category_repo,
            clock,
        }
    }
}

impl<P, C> PostsService<P, C>
where
    P: PostRepository,
    C: CategoryRepository,
{
    async fn validate(&self, fields: &PostFields) -> Result<(), Error> {
        let mut violations = fields.violations();
        if let Some(category_id) = fields.category_id {
            let category = self
                .category_repo
                .find_by_id(category_id)
                .await
                .map_err(map_category_repository_error)?;
            if category.is_none() {
                violations.push(CATEGORY_MUST_EXIST);
            }
        }
        violations.into_result()
    }

    async fn load(&self, id: PostId) -> Result<Post, Error> {
        self.post_repo
            .find_by_id(id)
            .await
            .map_err(map_post_repository_error)?
            .ok_or_else(|| not_found("Post", id))
    }
}

#[async_trait]
impl<P, C> PostsCommand for PostsService<P, C>
where
    P: PostRepository,
    C: CategoryRepository,
{
    async fn create_post(&self, changes: PostChanges) -> Result<Post, Error> {
        let fields = changes.apply(PostFields::default());
        self.validate(&fields).await?;
        let post = self
            .post_repo
            .insert(&fields, self.clock.utc())
            .await
            .map_err(map_post_repository_error)?;
        debug!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn update_post(&self, id: PostId, changes: PostChanges) -> Result<Post, Error> {
        let existing = self.load(id).await?;
        let fields = changes.apply(existing.fields);
        self.validate(&fields).await?;
        self.post_repo
            .update(id, &fields, self.clock.utc())
            .await
            .map_err(map_post_repository_error)?
            .ok_or_else(|| not_found("Post", id))
    }

    async fn delete_post(&self, id: PostId) -> Result<(), Error> {
        let deleted = self
            .post_repo
            .delete(id)
            .await
            .map_err(map_post_repository_error)?;
        if deleted {
            debug!(post_id = %id, "post deleted with its comments");
            Ok(())
        } else {
            Err(not_found("Post", id))
        }
    }
}

#[async_trait]
impl<P, C> PostsQuery for PostsService<P, C>
where
    P: PostRepository,
    C: CategoryRepository,
{
    async fn list_posts(&self) -> Result<Vec<Post>, Error> {
        self.post_repo
            .list()
            .await
            .map_err(map_post_repository_error)
    }

    async fn get_post(&self, id: PostId) -> Result<Post, Error> {
        self.load(id).await
    }
}

#[cfg(test)]
#[path = "posts_service_tests.rs"]
mod tests;
