//! Request-shape helpers shared by the resource handlers.
//!
//! Malformed bodies and unparsable path segments never reach the domain:
//! the extractor configs here turn them into `400` and `404` responses in
//! the shared error shape.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::domain::Error;

/// Deserialise a field that distinguishes "absent" from "explicitly null".
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`: an
/// absent key leaves the default `None`, `null` becomes `Some(None)` and a
/// value becomes `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "rejected request body");
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("Malformed request body: {inner}"),
        other => format!("Unreadable request body: {other}"),
    };
    Error::invalid_request(message).into()
}

fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), error = %err, "unparsable path segment");
    Error::not_found(format!("No route matches {}", req.path())).into()
}

/// JSON extractor settings: malformed bodies become `400 invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Path extractor settings: non-numeric ids become `404 not_found`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
