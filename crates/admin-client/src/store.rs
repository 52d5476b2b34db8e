//! Per-resource UI state.
//!
//! A [`ResourceStore`] bundles what one admin screen needs: the fetched
//! collection, the form being edited, the edit target and the error banner.
//! Every write re-fetches the collection afterwards, whether it succeeded or
//! not, so the list never drifts from the server.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::Clock;
use tracing::warn;

use crate::api::BlogApi;
use crate::banner::ErrorBanner;
use crate::error::ClientError;
use crate::records::{Editable, Post};
use crate::resource::{CommentsResource, Resource};

type Form<R> = <<R as Resource>::Record as Editable>::Form;

/// State for one editable collection.
pub struct ResourceStore<R: Resource> {
    resource: R,
    items: Vec<R::Record>,
    form: Form<R>,
    editing: Option<i64>,
    banner: ErrorBanner,
}

impl<R: Resource> ResourceStore<R> {
    /// Empty store in create mode.
    pub fn new(resource: R, clock: Arc<dyn Clock>) -> Self {
        Self {
            resource,
            items: Vec::new(),
            form: <Form<R>>::default(),
            editing: None,
            banner: ErrorBanner::new(clock),
        }
    }

    /// Records from the last successful fetch.
    #[must_use]
    pub fn items(&self) -> &[R::Record] {
        &self.items
    }

    /// Current form values.
    #[must_use]
    pub fn form(&self) -> &Form<R> {
        &self.form
    }

    /// Mutable access for input bindings.
    pub fn form_mut(&mut self) -> &mut Form<R> {
        &mut self.form
    }

    /// Record being edited; `None` in create mode.
    #[must_use]
    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// Error banner for this screen.
    #[must_use]
    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    /// The underlying resource.
    #[must_use]
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Replace `items` with a fresh fetch.
    ///
    /// # Errors
    /// The fetch failure, which is also shown in the banner.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self.resource.list().await {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "refresh failed");
                self.banner.show(error.messages());
                Err(error)
            }
        }
    }

    /// Load `record` into the form and switch to update mode.
    pub fn begin_edit(&mut self, record: &R::Record) {
        self.form = record.to_form();
        self.editing = Some(record.id());
    }

    /// Reset the form and return to create mode.
    pub fn cancel_edit(&mut self) {
        self.form = <Form<R>>::default();
        self.editing = None;
    }

    /// Create or update from the form, then re-fetch.
    ///
    /// Success resets the form; failure keeps it and shows the server's
    /// messages. A failed re-fetch after a failed write leaves the write's
    /// messages in place.
    ///
    /// # Errors
    /// The write failure.
    pub async fn submit(&mut self) -> Result<R::Record, ClientError> {
        self.banner.clear();
        let outcome = match self.editing {
            None => self.resource.create(&self.form).await,
            Some(id) => self.resource.update(id, &self.form).await,
        };
        match &outcome {
            Ok(_) => self.cancel_edit(),
            Err(error) => {
                warn!(error = %error, editing = ?self.editing, "submit failed");
                self.banner.show(error.messages());
            }
        }
        self.refetch_after(outcome.is_ok()).await;
        outcome
    }

    /// Delete record `id`, then re-fetch.
    ///
    /// # Errors
    /// The delete failure.
    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.banner.clear();
        let outcome = self.resource.delete(id).await;
        match &outcome {
            Ok(()) if self.editing == Some(id) => self.cancel_edit(),
            Ok(()) => {}
            Err(error) => {
                warn!(error = %error, id, "delete failed");
                self.banner.show(error.messages());
            }
        }
        self.refetch_after(outcome.is_ok()).await;
        outcome
    }

    async fn refetch_after(&mut self, write_succeeded: bool) {
        match self.resource.list().await {
            Ok(items) => self.items = items,
            Err(error) if write_succeeded => self.banner.show(error.messages()),
            Err(error) => warn!(error = %error, "re-fetch after failed write also failed"),
        }
    }
}

/// Comment stores keyed by parent post id.
pub struct CommentStores {
    api: BlogApi,
    clock: Arc<dyn Clock>,
    stores: HashMap<i64, ResourceStore<CommentsResource>>,
}

impl CommentStores {
    /// No stores yet; they are created on first use.
    pub fn new(api: BlogApi, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            stores: HashMap::new(),
        }
    }

    /// Store for `post_id`, created empty if missing.
    pub fn store(&mut self, post_id: i64) -> &mut ResourceStore<CommentsResource> {
        self.stores.entry(post_id).or_insert_with(|| {
            ResourceStore::new(
                CommentsResource::new(self.api.clone(), post_id),
                Arc::clone(&self.clock),
            )
        })
    }

    /// Existing store for `post_id`.
    #[must_use]
    pub fn get(&self, post_id: i64) -> Option<&ResourceStore<CommentsResource>> {
        self.stores.get(&post_id)
    }

    /// Keep one store per post in `posts` and refresh each.
    ///
    /// Stores for posts no longer listed are dropped.
    ///
    /// # Errors
    /// The first refresh failure; every store is still attempted.
    pub async fn refresh_for(&mut self, posts: &[Post]) -> Result<(), ClientError> {
        self.stores
            .retain(|post_id, _| posts.iter().any(|post| post.id == *post_id));
        let mut first_error = None;
        for post in posts {
            if let Err(error) = self.store(post.id).refresh().await {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests;
