//! Blog data service: posts, comments, categories and session login.
//!
//! Layered as a hexagon: [`domain`] holds records, rules and use-cases;
//! [`inbound`] adapts HTTP onto them; [`outbound`] implements storage and
//! password hashing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
