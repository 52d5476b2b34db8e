//! Request middleware.
//!
//! Only request correlation lives here; session handling is provided by
//! `actix-session` and wired in the server.

pub mod trace;

pub use trace::Trace;
