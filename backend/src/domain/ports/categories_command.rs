//! Driving port for category writes.

use async_trait::async_trait;

use crate::domain::{Category, CategoryChanges, CategoryId, Error};

/// Domain use-case port for creating, updating and deleting categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoriesCommand: Send + Sync {
    /// Create a category from the permitted fields.
    async fn create_category(&self, changes: CategoryChanges) -> Result<Category, Error>;

    /// Apply the permitted fields to an existing category.
    async fn update_category(
        &self,
        id: CategoryId,
        changes: CategoryChanges,
    ) -> Result<Category, Error>;

    /// Delete a category; its posts lose their category reference.
    async fn delete_category(&self, id: CategoryId) -> Result<(), Error>;
}
