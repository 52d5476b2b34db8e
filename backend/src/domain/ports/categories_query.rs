//! Driving port for category reads.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, Error};

/// Domain use-case port for reading categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoriesQuery: Send + Sync {
    /// All categories ordered by id.
    async fn list_categories(&self) -> Result<Vec<Category>, Error>;

    /// One category or a not-found error.
    async fn get_category(&self, id: CategoryId) -> Result<Category, Error>;
}
