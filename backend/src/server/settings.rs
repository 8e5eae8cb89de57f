//! Server settings loaded via OrthoConfig.
//!
//! Values come from `USER_REGISTRY_*` environment variables, an optional
//! configuration file, and command-line flags, in increasing precedence.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::ServerConfig;

const DEFAULT_DATA_FILE: &str = "data/users.json";
pub(crate) const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Configuration values controlling the listener and the backing document.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_REGISTRY")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Path of the JSON users document.
    pub data_file: Option<PathBuf>,
    /// Browser origin granted cross-origin access.
    pub allowed_origin: Option<String>,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

impl ServerSettings {
    /// Return the configured listener address, falling back to the default.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    /// Return the configured document path, falling back to the default.
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Return the configured origin, falling back to the default.
    pub fn allowed_origin(&self) -> &str {
        self.allowed_origin
            .as_deref()
            .unwrap_or(DEFAULT_ALLOWED_ORIGIN)
    }

    /// Convert the loaded settings into a [`ServerConfig`].
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.bind_addr(), self.data_file())
            .with_allowed_origin(self.allowed_origin())
    }
}
