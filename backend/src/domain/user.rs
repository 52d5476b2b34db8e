//! User accounts.
//!
//! [`User`] is the public projection returned to clients. The password hash
//! only travels inside [`StoredUser`], which never implements `Serialize`.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{UserId, Violations};

/// Minimum password length, counted in characters.
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Message recorded when another account already uses the email.
pub const EMAIL_TAKEN: &str = "Email has already been taken";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address: trimmed and lower-cased.
///
/// # Examples
/// ```
/// use blog_backend::domain::Email;
///
/// let email = Email::parse("  Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

/// Reasons an email string is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    /// Empty once trimmed.
    Blank,
    /// Not shaped like `local@domain.tld`.
    Invalid,
}

impl EmailError {
    /// Field-prefixed message shown to clients.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Blank => "Email can't be blank",
            Self::Invalid => "Email is invalid",
        }
    }
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for EmailError {}

impl Email {
    /// Normalise and validate `raw`.
    ///
    /// # Errors
    /// [`EmailError::Blank`] or [`EmailError::Invalid`].
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let normalised = raw.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(EmailError::Blank);
        }
        if !email_regex().is_match(&normalised) {
            return Err(EmailError::Invalid);
        }
        Ok(Self(normalised))
    }
}

impl Email {
    /// The normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash read from storage or produced by a hasher.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Account as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identifier.
    pub id: UserId,
    /// Normalised email address.
    pub email: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Account together with its password hash, as held by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    /// Public projection.
    pub user: User,
    /// Salted hash of the password.
    pub password_hash: PasswordHash,
}

/// Values needed to insert an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Normalised email address.
    pub email: Email,
    /// Salted hash of the password.
    pub password_hash: PasswordHash,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Registration request as submitted.
#[derive(Clone)]
pub struct Registration {
    email: String,
    password: Zeroizing<String>,
}

impl Registration {
    /// Capture raw registration input.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Parse the email, recording a violation when it is blank or malformed.
    pub fn check_email(&self, violations: &mut Violations) -> Option<Email> {
        Email::parse(&self.email)
            .map_err(|error| violations.push(error.message()))
            .ok()
    }

    /// Record password violations. A blank password skips the length rule.
    pub fn check_password(&self, violations: &mut Violations) {
        if violations.require_present("Password", &self.password) {
            violations.require_min_chars("Password", &self.password, PASSWORD_MIN_CHARS);
        }
    }

    /// Plain-text password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.com", "ada@example.com")]
    #[case("  Ada@Example.COM\t", "ada@example.com")]
    fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
        let email = Email::parse(raw).expect("valid email");
        assert_eq!(email.as_str(), expected);
    }

    #[rstest]
    #[case("", EmailError::Blank)]
    #[case("   ", EmailError::Blank)]
    #[case("ada", EmailError::Invalid)]
    #[case("ada@", EmailError::Invalid)]
    #[case("ada@example", EmailError::Invalid)]
    #[case("a da@example.com", EmailError::Invalid)]
    fn rejects_bad_email(#[case] raw: &str, #[case] expected: EmailError) {
        assert_eq!(Email::parse(raw), Err(expected));
    }

    #[rstest]
    #[case("", "", &["Email can't be blank", "Password can't be blank"])]
    #[case("bad", "short", &["Email is invalid", "Password is too short (minimum is 8 characters)"])]
    #[case("ada@example.com", "long enough", &[])]
    fn registration_checks_fields_in_order(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: &[&str],
    ) {
        let registration = Registration::new(email, password);
        let mut violations = Violations::new();
        registration.check_email(&mut violations);
        registration.check_password(&mut violations);
        let messages = violations
            .into_result()
            .err()
            .map(|error| error.errors().to_vec())
            .unwrap_or_default();
        assert_eq!(messages, expected);
    }

    #[rstest]
    fn debug_output_hides_secrets() {
        let registration = Registration::new("ada@example.com", "hunter2hunter2");
        assert!(!format!("{registration:?}").contains("hunter2"));
        assert_eq!(
            format!("{:?}", PasswordHash::new("$argon2id$secret")),
            "PasswordHash(..)"
        );
    }
}
