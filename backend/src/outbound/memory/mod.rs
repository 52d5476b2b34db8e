//! In-memory repositories.
//!
//! [`InMemoryBlogStore`] implements every repository port over one set of
//! tables guarded by a single async mutex, so cascades and uniqueness checks
//! are atomic the same way a database transaction would make them. The
//! server falls back to it when no database URL is configured, and the HTTP
//! tests run against it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, CommentRepository, CommentRepositoryError,
    PostRepository, PostRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Category, CategoryFields, CategoryId, Comment, CommentFields, CommentId, CommentWithPost,
    Email, NewUser, Post, PostFields, PostId, StoredUser, User, UserId,
};

/// Rows keyed by id, plus the last id handed out.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Table<StoredUser>,
    categories: Table<Category>,
    posts: Table<Post>,
    comments: Table<Comment>,
}

/// Process-local blog storage.
///
/// Identifiers are never reused, matching `BIGSERIAL` behaviour.
#[derive(Debug, Default)]
pub struct InMemoryBlogStore {
    tables: Mutex<Tables>,
}

impl InMemoryBlogStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.posts.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.posts.rows.get(&id.get()).cloned())
    }

    async fn insert(
        &self,
        fields: &PostFields,
        at: DateTime<Utc>,
    ) -> Result<Post, PostRepositoryError> {
        let mut tables = self.tables.lock().await;
        if let Some(category_id) = fields.category_id {
            if !tables.categories.rows.contains_key(&category_id.get()) {
                return Err(PostRepositoryError::missing_category());
            }
        }
        let id = tables.posts.next_id();
        let post = Post {
            id: PostId::new(id),
            fields: fields.clone(),
            created_at: at,
            updated_at: at,
        };
        tables.posts.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: PostId,
        fields: &PostFields,
        at: DateTime<Utc>,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut tables = self.tables.lock().await;
        if let Some(category_id) = fields.category_id {
            if !tables.categories.rows.contains_key(&category_id.get()) {
                return Err(PostRepositoryError::missing_category());
            }
        }
        Ok(tables.posts.rows.get_mut(&id.get()).map(|post| {
            post.fields = fields.clone();
            post.updated_at = at;
            post.clone()
        }))
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.posts.rows.remove(&id.get()).is_none() {
            return Ok(false);
        }
        tables
            .comments
            .rows
            .retain(|_, comment| comment.post_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn list_with_posts(&self) -> Result<Vec<CommentWithPost>, CommentRepositoryError> {
        let tables = self.tables.lock().await;
        tables
            .comments
            .rows
            .values()
            .map(|comment| {
                let post = tables
                    .posts
                    .rows
                    .get(&comment.post_id.get())
                    .cloned()
                    .ok_or_else(|| CommentRepositoryError::query("comment without parent post"))?;
                Ok(CommentWithPost {
                    comment: comment.clone(),
                    post,
                })
            })
            .collect()
    }

    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .comments
            .rows
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn find_for_post(
        &self,
        post_id: PostId,
        id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .comments
            .rows
            .get(&id.get())
            .filter(|comment| comment.post_id == post_id)
            .cloned())
    }

    async fn insert(
        &self,
        post_id: PostId,
        fields: &CommentFields,
        at: DateTime<Utc>,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut tables = self.tables.lock().await;
        if !tables.posts.rows.contains_key(&post_id.get()) {
            return Err(CommentRepositoryError::query("referenced post does not exist"));
        }
        let id = tables.comments.next_id();
        let comment = Comment {
            id: CommentId::new(id),
            post_id,
            fields: fields.clone(),
            created_at: at,
            updated_at: at,
        };
        tables.comments.rows.insert(id, comment.clone());
        Ok(comment)
    }

    async fn update(
        &self,
        post_id: PostId,
        id: CommentId,
        fields: &CommentFields,
        at: DateTime<Utc>,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut tables = self.tables.lock().await;
        Ok(tables
            .comments
            .rows
            .get_mut(&id.get())
            .filter(|comment| comment.post_id == post_id)
            .map(|comment| {
                comment.fields = fields.clone();
                comment.updated_at = at;
                comment.clone()
            }))
    }

    async fn delete(&self, post_id: PostId, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut tables = self.tables.lock().await;
        let belongs = tables
            .comments
            .rows
            .get(&id.get())
            .is_some_and(|comment| comment.post_id == post_id);
        if belongs {
            tables.comments.rows.remove(&id.get());
        }
        Ok(belongs)
    }
}

fn name_taken(tables: &Tables, name: &str, except: Option<CategoryId>) -> bool {
    tables
        .categories
        .rows
        .values()
        .any(|category| category.fields.name == name && Some(category.id) != except)
}

#[async_trait]
impl CategoryRepository for InMemoryBlogStore {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.categories.rows.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.categories.rows.get(&id.get()).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, CategoryRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .categories
            .rows
            .values()
            .find(|category| category.fields.name == name)
            .cloned())
    }

    async fn insert(
        &self,
        fields: &CategoryFields,
        at: DateTime<Utc>,
    ) -> Result<Category, CategoryRepositoryError> {
        let mut tables = self.tables.lock().await;
        if name_taken(&tables, &fields.name, None) {
            return Err(CategoryRepositoryError::duplicate_name(fields.name.clone()));
        }
        let id = tables.categories.next_id();
        let category = Category {
            id: CategoryId::new(id),
            fields: fields.clone(),
            created_at: at,
            updated_at: at,
        };
        tables.categories.rows.insert(id, category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        id: CategoryId,
        fields: &CategoryFields,
        at: DateTime<Utc>,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let mut tables = self.tables.lock().await;
        if name_taken(&tables, &fields.name, Some(id)) {
            return Err(CategoryRepositoryError::duplicate_name(fields.name.clone()));
        }
        Ok(tables.categories.rows.get_mut(&id.get()).map(|category| {
            category.fields = fields.clone();
            category.updated_at = at;
            category.clone()
        }))
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.categories.rows.remove(&id.get()).is_none() {
            return Ok(false);
        }
        for post in tables.posts.rows.values_mut() {
            if post.fields.category_id == Some(id) {
                post.fields.category_id = None;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl UserRepository for InMemoryBlogStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .rows
            .get(&id.get())
            .map(|stored| stored.user.clone()))
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .rows
            .values()
            .find(|stored| stored.user.email == email.as_str())
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut tables = self.tables.lock().await;
        let taken = tables
            .users
            .rows
            .values()
            .any(|stored| stored.user.email == user.email.as_str());
        if taken {
            return Err(UserRepositoryError::duplicate_email(user.email.to_string()));
        }
        let id = tables.users.next_id();
        let stored = StoredUser {
            user: User {
                id: UserId::new(id),
                email: user.email.to_string(),
                created_at: user.created_at,
                updated_at: user.created_at,
            },
            password_hash: user.password_hash.clone(),
        };
        tables.users.rows.insert(id, stored.clone());
        Ok(stored.user)
    }
}
