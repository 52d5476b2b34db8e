//! Server settings loaded via OrthoConfig.
//!
//! Every value can come from `BLOG_*` environment variables, a config file or
//! the command line; unset values fall back to local-development defaults.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Process-level configuration for the blog server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL URL; in-memory storage is used when absent.
    pub database_url: Option<String>,
    /// Browser origin allowed to call the API with credentials.
    pub cors_origin: Option<String>,
    /// Email of the account ensured at startup.
    pub admin_email: Option<String>,
    /// Password for the bootstrap account.
    pub admin_password: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl ServerSettings {
    /// Socket address built from host and port.
    ///
    /// # Errors
    /// Returns an error when the host is not an IP address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port;
        format!("{host}:{port}").parse().map_err(|err| {
            std::io::Error::other(format!("invalid bind address {host}:{port}: {err}"))
        })
    }

    /// Configured CORS origin, falling back to the Vite dev server.
    pub fn cors_origin(&self) -> &str {
        self.cors_origin.as_deref().unwrap_or(DEFAULT_CORS_ORIGIN)
    }

    /// Configured pool size, falling back to the default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Bootstrap credentials when both halves are configured.
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (self.admin_email.as_deref(), self.admin_password.as_deref()) {
            (Some(email), Some(password)) if !email.trim().is_empty() => Some((email, password)),
            _ => None,
        }
    }
}
