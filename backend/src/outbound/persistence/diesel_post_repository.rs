//! PostgreSQL-backed `PostRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{CategoryId, Post, PostFields, PostId};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewPostRow, PostRow, PostUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, posts};

/// Diesel-backed post storage.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn map_write_error(error: diesel::result::Error) -> PostRepositoryError {
    if is_foreign_key_violation(&error) {
        PostRepositoryError::missing_category()
    } else {
        map_diesel_error(error)
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PostRow> = posts::table
            .select(PostRow::as_select())
            .order_by(posts::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PostRow> = posts::table
            .find(id.get())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Post::from))
    }

    async fn insert(
        &self,
        fields: &PostFields,
        at: DateTime<Utc>,
    ) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewPostRow {
            title: &fields.title,
            body: &fields.body,
            category_id: fields.category_id.map(CategoryId::get),
            created_at: at,
            updated_at: at,
        };
        let row: PostRow = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_write_error)?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: PostId,
        fields: &PostFields,
        at: DateTime<Utc>,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = PostUpdate {
            title: &fields.title,
            body: &fields.body,
            category_id: fields.category_id.map(CategoryId::get),
            updated_at: at,
        };
        let row: Option<PostRow> = diesel::update(posts::table.find(id.get()))
            .set(&changes)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_write_error)?;
        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // The comments FK also cascades; deleting them here keeps both
        // statements in one transaction regardless of schema drift.
        let deleted = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(comments::table.filter(comments::post_id.eq(id.get())))
                        .execute(conn)
                        .await?;
                    diesel::delete(posts::table.find(id.get()))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
