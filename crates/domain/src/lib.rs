//! FCut Domain - Core host types
//!
//! This crate defines the domain model for the FCut desktop host.
//! All types here are pure Rust with no I/O dependencies.

pub mod action;
pub mod bridge;
pub mod catalogue;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod lifecycle;
pub mod paths;

pub use action::Action;
pub use bridge::{
    BridgeErrorCode, BridgeFault, BridgeMethod, BridgeOutcome, BridgeRequest, BridgeResponse,
    LogLevel, PROTOCOL_VERSION,
};
pub use catalogue::{ConstantCatalogue, ConstantRegistry};
pub use config::{
    DevConfig, EnvironmentConfig, HostConfig, LoggingConfig, ProductInfo, Profile, ServerConfig,
    UiConfig, WindowConfig,
};
pub use endpoint::ServiceEndpoint;
pub use error::{DomainError, DomainResult};
pub use lifecycle::LifecycleState;
pub use paths::AppPaths;
