//! Category use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    CategoriesCommand, CategoriesQuery, CategoryRepository, CategoryRepositoryError,
};
use crate::domain::{
    CATEGORY_NAME_TAKEN, Category, CategoryChanges, CategoryFields, CategoryId, Error, not_found,
    validation::is_blank,
};

pub(crate) fn map_category_repository_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
        CategoryRepositoryError::DuplicateName { .. } => {
            Error::validation(vec![CATEGORY_NAME_TAKEN.to_owned()])
        }
    }
}

/// Category service implementing the category driving ports.
#[derive(Clone)]
pub struct CategoriesService<R> {
    category_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CategoriesService<R> {
    /// Create a service over the category repository.
    pub fn new(category_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            category_repo,
            clock,
        }
    }
}

impl<R> CategoriesService<R>
where
    R: CategoryRepository,
{
    async fn validate(
        &self,
        fields: &CategoryFields,
        current: Option<CategoryId>,
    ) -> Result<(), Error> {
        let mut violations = fields.violations();
        if !is_blank(&fields.name) {
            let holder = self
                .category_repo
                .find_by_name(&fields.name)
                .await
                .map_err(map_category_repository_error)?;
            if holder.is_some_and(|category| Some(category.id) != current) {
                violations.push(CATEGORY_NAME_TAKEN);
            }
        }
        violations.into_result()
    }

    async fn load(&self, id: CategoryId) -> Result<Category, Error> {
        self.category_repo
            .find_by_id(id)
            .await
            .map_err(map_category_repository_error)?
            .ok_or_else(|| not_found("Category", id))
    }
}

#[async_trait]
impl<R> CategoriesCommand for CategoriesService<R>
where
    R: CategoryRepository,
{
    async fn create_category(&self, changes: CategoryChanges) -> Result<Category, Error> {
        let fields = changes.apply(CategoryFields::default());
        self.validate(&fields, None).await?;
        let category = self
            .category_repo
            .insert(&fields, self.clock.utc())
            .await
            .map_err(map_category_repository_error)?;
        debug!(category_id = %category.id, "category created");
        Ok(category)
    }

    async fn update_category(
        &self,
        id: CategoryId,
        changes: CategoryChanges,
    ) -> Result<Category, Error> {
        let existing = self.load(id).await?;
        let fields = changes.apply(existing.fields);
        self.validate(&fields, Some(id)).await?;
        self.category_repo
            .update(id, &fields, self.clock.utc())
            .await
            .map_err(map_category_repository_error)?
            .ok_or_else(|| not_found("Category", id))
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), Error> {
        let deleted = self
            .category_repo
            .delete(id)
            .await
            .map_err(map_category_repository_error)?;
        if deleted {
            debug!(category_id = %id, "category deleted");
            Ok(())
        } else {
            Err(not_found("Category", id))
        }
    }
}

#[async_trait]
impl<R> CategoriesQuery for CategoriesService<R>
where
    R: CategoryRepository,
{
    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.category_repo
            .list()
            .await
            .map_err(map_category_repository_error)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Category, Error> {
        self.load(id).await
    }
}

#[cfg(test)]
#[path = "categories_service_tests.rs"]
mod tests;
