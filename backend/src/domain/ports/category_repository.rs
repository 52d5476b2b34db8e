//! Port abstraction for category persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Category, CategoryFields, CategoryId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by category repository adapters.
    pub enum CategoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
        /// The unique name index rejected the write.
        DuplicateName { name: String } => "category name already exists: {name}",
    }
}

/// Storage for categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by id.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Fetch one category.
    async fn find_by_id(&self, id: CategoryId)
    -> Result<Option<Category>, CategoryRepositoryError>;

    /// Fetch the category with exactly this name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Insert a category.
    async fn insert(
        &self,
        fields: &CategoryFields,
        at: DateTime<Utc>,
    ) -> Result<Category, CategoryRepositoryError>;

    /// Overwrite the editable fields and `updated_at`.
    async fn update(
        &self,
        id: CategoryId,
        fields: &CategoryFields,
        at: DateTime<Utc>,
    ) -> Result<Option<Category>, CategoryRepositoryError>;

    /// Delete a category, clearing the reference on its posts.
    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError>;
}
