//! FCut Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus the startup plumbing
//! (configuration, paths, logging) the binary wires together.

pub mod adapters;
pub mod logging;
pub mod paths;
pub mod server;
pub mod settings;

pub use adapters::{RfdFileDialogs, StdChildProcess, StdProcessLauncher, TracingLogSink, UI_LOG_TARGET};
pub use logging::{LogGuard, clean_old_logs, init_logging, log_file_name};
pub use paths::{resolve_paths, runtime_dir};
pub use server::{AxumAssetServer, ProxyState, ServerBackend};
pub use settings::{CONFIG_ENV_VAR, ENV_PREFIX, config_file_path, load_config};
