//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The blog exposes a single transport, HTTP, under [`http`].

pub mod http;
