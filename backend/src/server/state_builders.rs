//! Builders wiring repositories and services into HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use blog_backend::domain::ports::{
    CategoryRepository, CommentRepository, PostRepository, UserRepository,
};
use blog_backend::domain::{
    AccountsService, CategoriesService, CommentsService, PostsService, Registration,
};
use blog_backend::inbound::http::state::{HttpState, HttpStatePorts};
use blog_backend::outbound::memory::InMemoryBlogStore;
use blog_backend::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselCommentRepository, DieselPostRepository,
    DieselUserRepository,
};
use blog_backend::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// One repository per driven port.
struct Repositories<U, P, C, K> {
    users: Arc<U>,
    posts: Arc<P>,
    comments: Arc<C>,
    categories: Arc<K>,
}

impl Repositories<
    DieselUserRepository,
    DieselPostRepository,
    DieselCommentRepository,
    DieselCategoryRepository,
> {
    fn diesel(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            posts: Arc::new(DieselPostRepository::new(pool.clone())),
            comments: Arc::new(DieselCommentRepository::new(pool.clone())),
            categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
        }
    }
}

impl Repositories<InMemoryBlogStore, InMemoryBlogStore, InMemoryBlogStore, InMemoryBlogStore> {
    fn in_memory() -> Self {
        let store = Arc::new(InMemoryBlogStore::default());
        Self {
            users: Arc::clone(&store),
            posts: Arc::clone(&store),
            comments: Arc::clone(&store),
            categories: store,
        }
    }
}

fn wire_state<U, P, C, K>(
    repos: Repositories<U, P, C, K>,
    hasher: Arc<Argon2PasswordHasher>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
    C: CommentRepository + 'static,
    K: CategoryRepository + 'static,
{
    let Repositories {
        users,
        posts,
        comments,
        categories,
    } = repos;

    let accounts = Arc::new(AccountsService::new(users, hasher, Arc::clone(&clock)));
    let posts_service = Arc::new(PostsService::new(
        Arc::clone(&posts),
        Arc::clone(&categories),
        Arc::clone(&clock),
    ));
    let comments_service = Arc::new(CommentsService::new(comments, posts, Arc::clone(&clock)));
    let categories_service = Arc::new(CategoriesService::new(categories, clock));

    HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        users_command: accounts.clone(),
        users_query: accounts,
        posts_command: posts_service.clone(),
        posts_query: posts_service,
        comments_command: comments_service.clone(),
        comments_query: comments_service,
        categories_command: categories_service.clone(),
        categories_query: categories_service,
    })
}

/// Build HTTP state from Diesel repositories when a pool is configured,
/// otherwise from a fresh in-memory store.
///
/// # Errors
/// Returns [`std::io::Error`] when the password hasher cannot initialise.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let hasher = Arc::new(Argon2PasswordHasher::new().map_err(std::io::Error::other)?);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            wire_state(Repositories::diesel(pool), hasher, clock)
        }
        None => {
            info!("no database configured; using in-memory repositories");
            wire_state(Repositories::in_memory(), hasher, clock)
        }
    };
    Ok(state)
}

/// Make sure the bootstrap account exists, creating it when missing.
///
/// # Errors
/// Returns [`std::io::Error`] when the credentials fail validation or
/// storage is unavailable.
pub(super) async fn ensure_admin(state: &HttpState, admin: Registration) -> std::io::Result<()> {
    let user = state
        .users_command
        .ensure_account(admin)
        .await
        .map_err(|err| std::io::Error::other(format!("bootstrap account failed: {err}")))?;
    info!(user_id = %user.id, "bootstrap account ready");
    Ok(())
}
