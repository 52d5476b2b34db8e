//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`), integration tests (in `tests/`) and the
//! admin client's tests. Compiled for `cfg(test)` or with the `test-support`
//! feature.

use std::sync::{Arc, Mutex, PoisonError};

use argon2::Params;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{AccountsService, CategoriesService, CommentsService, PostsService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryBlogStore;
use crate::outbound::security::Argon2PasswordHasher;

pub use crate::inbound::http::test_utils::{api_test_app, session_cookie, test_session_middleware};

/// Fixed instant used as the default fixture time.
///
/// # Panics
/// Never; the literal is a valid timestamp.
#[must_use]
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .unwrap_or_else(|| panic!("fixture timestamp is valid"))
}

/// Manually advanced clock.
#[derive(Debug)]
pub struct FixtureClock {
    utc_now: Mutex<DateTime<Utc>>,
}

impl FixtureClock {
    /// Clock frozen at `utc_now`.
    #[must_use]
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        Self {
            utc_now: Mutex::new(utc_now),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.utc_now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for FixtureClock {
    fn default() -> Self {
        Self::at(fixture_timestamp())
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.utc_now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fixture clock as the trait object services expect.
#[must_use]
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock::default())
}

/// Argon2id hasher with minimal cost so tests stay quick.
///
/// # Panics
/// Panics if the parameters are rejected or the dummy hash fails.
#[must_use]
pub fn fast_password_hasher() -> Argon2PasswordHasher {
    let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
        .unwrap_or_else(|err| panic!("argon2 test parameters are valid: {err}"));
    Argon2PasswordHasher::with_params(params)
        .unwrap_or_else(|err| panic!("argon2 hasher should initialise: {err}"))
}

/// HTTP state wired to real services over one in-memory store.
///
/// # Panics
/// Panics if the Argon2 hasher cannot produce its dummy hash.
#[must_use]
pub fn in_memory_state() -> HttpState {
    in_memory_state_with(Arc::new(InMemoryBlogStore::default()), fixture_clock())
}

/// HTTP state over the given store and clock.
///
/// # Panics
/// Panics if the Argon2 hasher cannot produce its dummy hash.
#[must_use]
pub fn in_memory_state_with(store: Arc<InMemoryBlogStore>, clock: Arc<dyn Clock>) -> HttpState {
    let hasher = Arc::new(fast_password_hasher());
    let accounts = Arc::new(AccountsService::new(
        Arc::clone(&store),
        hasher,
        Arc::clone(&clock),
    ));
    let posts = Arc::new(PostsService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&clock),
    ));
    let comments = Arc::new(CommentsService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&clock),
    ));
    let categories = Arc::new(CategoriesService::new(store, clock));

    HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        users_command: accounts.clone(),
        users_query: accounts,
        posts_command: posts.clone(),
        posts_query: posts,
        comments_command: comments.clone(),
        comments_query: comments,
        categories_command: categories.clone(),
        categories_query: categories,
    })
}
