//! Resource seam between the UI stores and the HTTP client.
//!
//! [`crate::ResourceStore`] drives list/create/update/delete through this
//! trait so store behaviour can be tested without a server.

use async_trait::async_trait;

use crate::api::BlogApi;
use crate::error::ClientError;
use crate::records::{Category, CategoryForm, Comment, CommentForm, Editable, Post, PostForm};

/// One editable collection exposed by the API.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Record type listed and edited.
    type Record: Editable + Clone + Send + Sync;

    /// Fetch the whole collection.
    async fn list(&self) -> Result<Vec<Self::Record>, ClientError>;

    /// Create a record from `form`.
    async fn create(
        &self,
        form: &<Self::Record as Editable>::Form,
    ) -> Result<Self::Record, ClientError>;

    /// Replace the editable fields of record `id`.
    async fn update(
        &self,
        id: i64,
        form: &<Self::Record as Editable>::Form,
    ) -> Result<Self::Record, ClientError>;

    /// Delete record `id`.
    async fn delete(&self, id: i64) -> Result<(), ClientError>;
}

/// Posts collection.
#[derive(Clone)]
pub struct PostsResource(pub BlogApi);

#[async_trait]
impl Resource for PostsResource {
    type Record = Post;

    async fn list(&self) -> Result<Vec<Post>, ClientError> {
        self.0.list_posts().await
    }

    async fn create(&self, form: &PostForm) -> Result<Post, ClientError> {
        self.0.create_post(form).await
    }

    async fn update(&self, id: i64, form: &PostForm) -> Result<Post, ClientError> {
        self.0.update_post(id, form).await
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.0.delete_post(id).await
    }
}

/// Categories collection.
#[derive(Clone)]
pub struct CategoriesResource(pub BlogApi);

#[async_trait]
impl Resource for CategoriesResource {
    type Record = Category;

    async fn list(&self) -> Result<Vec<Category>, ClientError> {
        self.0.list_categories().await
    }

    async fn create(&self, form: &CategoryForm) -> Result<Category, ClientError> {
        self.0.create_category(form).await
    }

    async fn update(&self, id: i64, form: &CategoryForm) -> Result<Category, ClientError> {
        self.0.update_category(id, form).await
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.0.delete_category(id).await
    }
}

/// Comments under one post.
#[derive(Clone)]
pub struct CommentsResource {
    api: BlogApi,
    post_id: i64,
}

impl CommentsResource {
    /// Comments belonging to `post_id`.
    #[must_use]
    pub fn new(api: BlogApi, post_id: i64) -> Self {
        Self { api, post_id }
    }

    /// Parent post.
    #[must_use]
    pub fn post_id(&self) -> i64 {
        self.post_id
    }
}

#[async_trait]
impl Resource for CommentsResource {
    type Record = Comment;

    async fn list(&self) -> Result<Vec<Comment>, ClientError> {
        self.api.list_comments(self.post_id).await
    }

    async fn create(&self, form: &CommentForm) -> Result<Comment, ClientError> {
        self.api.create_comment(self.post_id, form).await
    }

    async fn update(&self, id: i64, form: &CommentForm) -> Result<Comment, ClientError> {
        self.api.update_comment(self.post_id, id, form).await
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.api.delete_comment(self.post_id, id).await
    }
}
