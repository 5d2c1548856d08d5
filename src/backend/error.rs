//! Backend Error Types
//!
//! Errors that can take the server down. Per-connection I/O failures never
//! surface here (the connection tasks consume those locally), so every
//! variant of [`ServerError`] is fatal to the process.

use thiserror::Error;

/// A fatal server error.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening socket could not be created.
    #[error("failed to bind port {port}: {source}")]
    Bind {
        /// The requested port.
        port: u16,
        /// The underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// The listening socket broke while accepting connections.
    #[error("listener error: {0}")]
    Listener(#[from] std::io::Error),
}

impl ServerError {
    pub fn bind(port: u16, source: std::io::Error) -> Self {
        Self::Bind { port, source }
    }
}
