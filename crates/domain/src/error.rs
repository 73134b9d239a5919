//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The service endpoint cannot be turned into a URL or socket address.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A configuration value is out of range or malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A lifecycle transition went backwards or skipped a state.
    #[error("invalid lifecycle transition from {from} to {to}")]
    InvalidTransition {
        /// State the host was in.
        from: String,
        /// State that was requested.
        to: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
