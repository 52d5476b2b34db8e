//! Admin login state.
//!
//! The server-issued cookie lives in the client's cookie store; this type
//! only remembers which user it belongs to. Nothing is persisted locally, so
//! [`AdminSession::restore`] asks the server whether the cookie still holds.

use tracing::{info, warn};

use crate::api::BlogApi;
use crate::error::ClientError;
use crate::records::User;

/// Logged-in user for one admin client.
#[derive(Clone)]
pub struct AdminSession {
    api: BlogApi,
    user: Option<User>,
}

impl AdminSession {
    /// Logged-out session over `api`.
    #[must_use]
    pub fn new(api: BlogApi) -> Self {
        Self { api, user: None }
    }

    /// Sign in; the cookie store keeps the session cookie.
    ///
    /// # Errors
    /// [`ClientError::Api`] with status 401 for bad credentials; the
    /// session stays logged out.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, ClientError> {
        self.user = None;
        let user = self.api.login(email, password).await?;
        info!(user_id = user.id, "admin signed in");
        Ok(self.user.insert(user))
    }

    /// Sign out. The local user is forgotten even if the request fails.
    ///
    /// # Errors
    /// The logout request failure.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.user = None;
        self.api.logout().await
    }

    /// Re-validate the session cookie via `/me`.
    ///
    /// Returns `None` when the server no longer recognises the session.
    ///
    /// # Errors
    /// Failures other than 401.
    pub async fn restore(&mut self) -> Result<Option<&User>, ClientError> {
        match self.api.current_user().await {
            Ok(user) => Ok(Some(self.user.insert(user))),
            Err(error) if error.is_unauthorized() => {
                self.user = None;
                Ok(None)
            }
            Err(error) => {
                warn!(error = %error, "session check failed");
                Err(error)
            }
        }
    }

    /// Current user, if signed in.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Client sharing this session's cookies.
    #[must_use]
    pub fn api(&self) -> &BlogApi {
        &self.api
    }
}
