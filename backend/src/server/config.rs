//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use blog_backend::domain::Registration;
use blog_backend::inbound::http::session_config::SessionSettings;
use blog_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) cors_origin: String,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) admin: Option<Registration>,
}

impl ServerConfig {
    /// Construct a configuration backed by in-memory storage.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, cors_origin: impl Into<String>) -> Self {
        Self {
            session,
            bind_addr,
            cors_origin: cors_origin.into(),
            db_pool: None,
            admin: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Ensure an account with these credentials exists before serving.
    #[must_use]
    pub fn with_admin(mut self, admin: Registration) -> Self {
        self.admin = Some(admin);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
