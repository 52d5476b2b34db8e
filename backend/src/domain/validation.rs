//! Ordered collection of validation messages.
//!
//! Rules are checked in field declaration order and every failing rule adds
//! one human-readable message, so clients can render the list as-is.

use super::Error;

/// Accumulates rule violations for one record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Violations(Vec<String>);

impl Violations {
    /// Start an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Record `"{field} can't be blank"` when `value` is blank.
    ///
    /// Returns `true` when the value was present, so callers can skip
    /// follow-up rules that only make sense for non-blank input.
    pub fn require_present(&mut self, field: &str, value: &str) -> bool {
        if is_blank(value) {
            self.push(format!("{field} can't be blank"));
            false
        } else {
            true
        }
    }

    /// Record a minimum length violation counted in characters.
    pub fn require_min_chars(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.push(format!(
                "{field} is too short (minimum is {min} characters)"
            ));
        }
    }

    /// Whether no rule has failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a validation [`Error`] when any rule failed.
    ///
    /// # Errors
    /// Returns [`super::ErrorCode::ValidationFailed`] carrying every message.
    pub fn into_result(self) -> Result<(), Error> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(self.0))
        }
    }
}

/// Empty or whitespace-only.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
