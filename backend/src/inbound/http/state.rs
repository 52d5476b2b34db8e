//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CategoriesCommand, CategoriesQuery, CommentsCommand, CommentsQuery, LoginService,
    PostsCommand, PostsQuery, UsersCommand, UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub posts_command: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub comments_command: Arc<dyn CommentsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
    pub categories_command: Arc<dyn CategoriesCommand>,
    pub categories_query: Arc<dyn CategoriesQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub posts_command: Arc<dyn PostsCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub comments_command: Arc<dyn CommentsCommand>,
    pub comments_query: Arc<dyn CommentsQuery>,
    pub categories_command: Arc<dyn CategoriesCommand>,
    pub categories_query: Arc<dyn CategoriesQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// The account and content services each implement both halves of their
    /// command/query pair, so one `Arc` usually backs two fields.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            users_command,
            users_query,
            posts_command,
            posts_query,
            comments_command,
            comments_query,
            categories_command,
            categories_query,
        } = ports;
        Self {
            login,
            users_command,
            users_query,
            posts_command,
            posts_query,
            comments_command,
            comments_query,
            categories_command,
            categories_query,
        }
    }
}
