//! PostgreSQL-backed `CommentRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentFields, CommentId, CommentWithPost, PostId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CommentRow, CommentUpdate, NewCommentRow, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, posts};

/// Diesel-backed comment storage.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    map_basic_pool_error(error, CommentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn list_with_posts(&self) -> Result<Vec<CommentWithPost>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(CommentRow, PostRow)> = comments::table
            .inner_join(posts::table)
            .select((CommentRow::as_select(), PostRow::as_select()))
            .order_by(comments::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(comment, post)| CommentWithPost {
                comment: comment.into(),
                post: post.into(),
            })
            .collect())
    }

    async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CommentRow> = comments::table
            .filter(comments::post_id.eq(post_id.get()))
            .select(CommentRow::as_select())
            .order_by(comments::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn find_for_post(
        &self,
        post_id: PostId,
        id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CommentRow> = comments::table
            .filter(comments::id.eq(id.get()))
            .filter(comments::post_id.eq(post_id.get()))
            .select(CommentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Comment::from))
    }

    async fn insert(
        &self,
        post_id: PostId,
        fields: &CommentFields,
        at: DateTime<Utc>,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCommentRow {
            post_id: post_id.get(),
            body: &fields.body,
            created_at: at,
            updated_at: at,
        };
        let row: CommentRow = diesel::insert_into(comments::table)
            .values(&new_row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn update(
        &self,
        post_id: PostId,
        id: CommentId,
        fields: &CommentFields,
        at: DateTime<Utc>,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = comments::table
            .filter(comments::id.eq(id.get()))
            .filter(comments::post_id.eq(post_id.get()));
        let row: Option<CommentRow> = diesel::update(target)
            .set(&CommentUpdate {
                body: &fields.body,
                updated_at: at,
            })
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Comment::from))
    }

    async fn delete(&self, post_id: PostId, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let target = comments::table
            .filter(comments::id.eq(id.get()))
            .filter(comments::post_id.eq(post_id.get()));
        let deleted = diesel::delete(target)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
