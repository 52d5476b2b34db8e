//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store a new account.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Create the account unless the email is already registered.
    ///
    /// Returns the existing or newly created user. Used to bootstrap the
    /// administrator at startup.
    async fn ensure_account(&self, registration: Registration) -> Result<User, Error>;
}
