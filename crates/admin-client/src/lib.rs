//! Data and state layer for the blog admin client.
//!
//! [`BlogApi`] talks to the blog service over HTTP and keeps the session
//! cookie. [`ResourceStore`] holds one screen's collection, form and error
//! banner on top of a [`Resource`]; [`AdminSession`] tracks who is signed
//! in. Rendering is left to the embedding UI.

mod api;
mod banner;
mod dashboard;
mod error;
pub mod records;
mod resource;
mod session;
mod store;

pub use api::BlogApi;
pub use banner::{BannerPhase, ErrorBanner};
pub use dashboard::DashboardSummary;
pub use error::{ApiErrorBody, ClientError, DEFAULT_ERROR_MESSAGE};
pub use records::{
    Category, CategoryForm, Comment, CommentForm, CommentWithPost, Editable, Post, PostForm, User,
};
pub use resource::{CategoriesResource, CommentsResource, PostsResource, Resource};
pub use session::AdminSession;
pub use store::{CommentStores, ResourceStore};
