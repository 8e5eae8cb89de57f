//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) data_file: PathBuf,
    pub(crate) allowed_origin: String,
}

impl ServerConfig {
    /// Construct a server configuration for the given listener and document.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, data_file: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            data_file: data_file.into(),
            allowed_origin: super::settings::DEFAULT_ALLOWED_ORIGIN.to_owned(),
        }
    }

    /// Override the browser origin granted cross-origin access.
    #[must_use]
    pub fn with_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = origin.into();
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the location of the users document.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        self.data_file.as_path()
    }

    /// Return the origin sent in `Access-Control-Allow-Origin`.
    #[must_use]
    pub fn allowed_origin(&self) -> &str {
        self.allowed_origin.as_str()
    }
}
