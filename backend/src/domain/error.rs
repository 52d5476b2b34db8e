//! Domain-level error type.
//!
//! Errors are transport agnostic. The HTTP adapter maps [`ErrorCode`] onto
//! status codes; the serialised shape (`code`, `error`, `errors`, `traceId`)
//! is the wire contract shared with the admin client.

use serde::{Deserialize, Serialize};

use super::TraceId;

/// Stable machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request body is malformed.
    InvalidRequest,
    /// Credentials were rejected or no session is present.
    Unauthorized,
    /// The identifier does not resolve to a record.
    NotFound,
    /// One or more validation rules failed; see [`Error::errors`].
    ValidationFailed,
    /// A backing service (usually the database) is unreachable.
    ServiceUnavailable,
    /// Anything unexpected.
    InternalError,
}

/// Domain error payload.
///
/// `message` is a single human-readable summary. Validation failures also
/// carry the ordered list of rule violations in `errors`.
///
/// # Examples
/// ```
/// use blog_backend::domain::{Error, ErrorCode};
///
/// let err = Error::validation(vec!["Title can't be blank".to_owned()]);
/// assert_eq!(err.code(), ErrorCode::ValidationFailed);
/// assert_eq!(err.errors(), ["Title can't be blank"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    #[serde(rename = "error")]
    message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

/// Summary message attached to validation failures.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

impl Error {
    /// Create an error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: Vec::new(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable summary.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Ordered validation messages; empty for other error kinds.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Correlation identifier captured when the error was created.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Replace the correlation identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Build a validation failure from ordered rule messages.
    #[must_use]
    pub fn validation(errors: Vec<String>) -> Self {
        let mut error = Self::new(ErrorCode::ValidationFailed, VALIDATION_FAILED_MESSAGE);
        error.errors = errors;
        error
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Copy of this error safe to show to clients.
    ///
    /// Internal errors lose their message; the trace id survives so operators
    /// can find the original in the logs.
    #[must_use]
    pub fn redacted(&self) -> Self {
        if matches!(self.code, ErrorCode::InternalError) {
            Self {
                code: ErrorCode::InternalError,
                message: "Internal server error".to_owned(),
                errors: Vec::new(),
                trace_id: self.trace_id.clone(),
            }
        } else {
            self.clone()
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.message, self.errors.join(", "))
        }
    }
}

impl std::error::Error for Error {}
