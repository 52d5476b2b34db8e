//! Driving port for account lookups.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch the account behind a session.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
