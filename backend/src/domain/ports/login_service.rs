//! Driving port for password login.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing storage, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Every rejection is [`crate::domain::ErrorCode::Unauthorized`] with the
    /// same message, whatever the cause.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Reject a login payload that failed shape validation.
    ///
    /// Spends the same hashing work as an unknown account before returning
    /// the shared unauthorized error, so blank input costs as much as any
    /// other miss.
    async fn reject_malformed(&self, password: &str) -> Error;
}
