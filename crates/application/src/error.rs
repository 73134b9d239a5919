//! Application error types

use std::net::SocketAddr;

use fcut_domain::DomainError;
use thiserror::Error;

/// Host-level errors.
#[derive(Debug, Error, Clone)]
pub enum HostError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The asset server could not bind its endpoint.
    #[error("failed to bind {addr}: {reason}")]
    Bind {
        /// Address that was requested.
        addr: SocketAddr,
        /// Underlying cause.
        reason: String,
    },

    /// The asset server did not report readiness.
    #[error("server startup failed: {0}")]
    ServerStartup(String),

    /// An external process could not be spawned.
    #[error("failed to spawn process: {0}")]
    Spawn(String),

    /// A supervised process could not be queried or signalled.
    #[error("process error: {0}")]
    Process(String),

    /// A native dialog failed.
    #[error("dialog error: {0}")]
    Dialog(String),

    /// The native window or its event loop failed.
    #[error("window error: {0}")]
    Window(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for host operations.
pub type HostResult<T> = Result<T, HostError>;
