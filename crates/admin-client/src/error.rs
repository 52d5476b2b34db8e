//! Error types for the admin client.
//!
//! Every failed call surfaces as a [`ClientError`]. The UI only needs the
//! list of human-readable lines to show, which [`ClientError::messages`]
//! derives from the server's error body when one is available.

use serde::Deserialize;
use thiserror::Error;

/// Fallback line shown when a failure carries no message of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong.";

/// JSON error body returned by the blog API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Machine-readable error code, e.g. `validation_failed`.
    #[serde(default)]
    pub code: Option<String>,
    /// Single-line summary.
    #[serde(default)]
    pub error: Option<String>,
    /// Ordered validation messages.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Correlation identifier for server logs.
    #[serde(default)]
    pub trace_id: Option<String>,
}

/// Errors raised by [`crate::BlogApi`] calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("request rejected with status {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Decoded error body; `None` when the body was not JSON.
        body: Option<ApiErrorBody>,
    },

    /// The request never produced a response.
    #[error("request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// A success response could not be decoded.
    #[error("unexpected response body: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },

    /// The configured base URL is unusable.
    #[error("invalid base URL: {message}")]
    InvalidUrl {
        /// Description of the parse failure.
        message: String,
    },
}

impl ClientError {
    /// Build an API error from a status and raw body.
    pub fn api(status: u16, body: &[u8]) -> Self {
        Self::Api {
            status,
            body: serde_json::from_slice(body).ok(),
        }
    }

    /// HTTP status for API errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the session or credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Lines to show the user.
    ///
    /// Validation failures yield their ordered list; other API errors yield
    /// their summary. Anything else falls back to
    /// [`DEFAULT_ERROR_MESSAGE`].
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Api {
                body: Some(body), ..
            } if !body.errors.is_empty() => body.errors.clone(),
            Self::Api {
                body:
                    Some(ApiErrorBody {
                        error: Some(error), ..
                    }),
                ..
            } if !error.trim().is_empty() => vec![error.clone()],
            _ => vec![DEFAULT_ERROR_MESSAGE.to_owned()],
        }
    }
}
