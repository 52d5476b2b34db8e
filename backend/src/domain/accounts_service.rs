//! Account use-cases: registration, login and session lookups.
//!
//! Password hashing is CPU bound, so it runs on Tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, UserRepository, UserRepositoryError,
    UsersCommand, UsersQuery,
};
use crate::domain::{
    EMAIL_TAKEN, Email, Error, INVALID_CREDENTIALS, LoginCredentials, NewUser, PasswordHash,
    Registration, User, UserId, Violations, not_found,
};

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => Error::validation(vec![EMAIL_TAKEN.to_owned()]),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Account service implementing the login and user driving ports.
#[derive(Clone)]
pub struct AccountsService<U, H> {
    user_repo: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, H> AccountsService<U, H> {
    /// Create a service over the user repository and password hasher.
    pub fn new(user_repo: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            hasher,
            clock,
        }
    }
}

impl<U, H> AccountsService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn run_hasher<T, F>(&self, task: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&H) -> Result<T, PasswordHasherError> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || task(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("password task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    async fn verify(&self, password: &str, hash: Option<PasswordHash>) -> Result<bool, Error> {
        let password = Zeroizing::new(password.to_owned());
        let known = hash.is_some();
        let matched = self
            .run_hasher(move |hasher| match hash {
                Some(stored) => hasher.verify(&password, &stored),
                None => hasher.verify(&password, hasher.dummy_hash()).map(|_| false),
            })
            .await?;
        Ok(known && matched)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, Error> {
        Ok(self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(map_user_repository_error)?
            .map(|stored| stored.user))
    }
}

#[async_trait]
impl<U, H> LoginService for AccountsService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = match Email::parse(credentials.email()) {
            Ok(email) => self
                .user_repo
                .find_by_email(&email)
                .await
                .map_err(map_user_repository_error)?,
            Err(_) => None,
        };

        let (user, hash) = match stored {
            Some(stored) => (Some(stored.user), Some(stored.password_hash)),
            None => (None, None),
        };

        match (self.verify(credentials.password(), hash).await?, user) {
            (true, Some(user)) => {
                info!(user_id = %user.id, "login succeeded");
                Ok(user)
            }
            _ => {
                warn!("login rejected");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }

    async fn reject_malformed(&self, password: &str) -> Error {
        if let Err(error) = self.verify(password, None).await {
            return error;
        }
        warn!("malformed login rejected");
        Error::unauthorized(INVALID_CREDENTIALS)
    }
}

#[async_trait]
impl<U, H> UsersCommand for AccountsService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let mut violations = Violations::new();
        let email = registration.check_email(&mut violations);
        if let Some(email) = &email {
            if self.find_by_email(email).await?.is_some() {
                violations.push(EMAIL_TAKEN);
            }
        }
        registration.check_password(&mut violations);
        violations.into_result()?;

        let Some(email) = email else {
            return Err(Error::internal("email missing after validation"));
        };
        let password = Zeroizing::new(registration.password().to_owned());
        let password_hash = self.run_hasher(move |hasher| hasher.hash(&password)).await?;

        let user = self
            .user_repo
            .insert(&NewUser {
                email,
                password_hash,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_user_repository_error)?;
        debug!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn ensure_account(&self, registration: Registration) -> Result<User, Error> {
        let mut violations = Violations::new();
        if let Some(email) = registration.check_email(&mut violations) {
            if let Some(existing) = self.find_by_email(&email).await? {
                return Ok(existing);
            }
        }
        self.register(registration).await
    }
}

#[async_trait]
impl<U, H> UsersQuery for AccountsService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| not_found("User", id))
    }
}

#[cfg(test)]
#[path = "accounts_service_tests.rs"]
mod tests;
