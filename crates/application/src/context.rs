//! Explicit application context.
//!
//! Everything that would otherwise be process-global (configuration, paths,
//! the log sink, environment for child processes) is built once in `main`
//! and handed to each component by `Arc`.

use std::ffi::OsString;
use std::fmt;
use std::sync::Arc;

use fcut_domain::{
    AppPaths, ConstantCatalogue, ConstantRegistry, EnvironmentConfig, HostConfig, ServiceEndpoint,
};

use crate::{HostError, HostResult, LogSink};

/// Environment variables applied to every spawned process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessEnvironment {
    vars: Vec<(String, OsString)>,
}

impl ProcessEnvironment {
    /// Builds the child environment: `PATH` with the runtime directory and
    /// its `bin` prepended to `current_path`, plus the forced encoding
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory contains the path separator.
    pub fn derive(
        paths: &AppPaths,
        current_path: Option<OsString>,
        encoding: &EnvironmentConfig,
    ) -> HostResult<Self> {
        let mut search = vec![paths.runtime.clone(), paths.bin.clone()];
        if let Some(current) = current_path {
            search.extend(std::env::split_paths(&current));
        }
        let joined = std::env::join_paths(search)
            .map_err(|e| HostError::Config(format!("cannot build PATH: {e}")))?;

        Ok(Self {
            vars: vec![
                ("PATH".to_string(), joined),
                (
                    encoding.encoding_var.clone(),
                    OsString::from(&encoding.encoding_value),
                ),
            ],
        })
    }

    /// Variables in application order.
    #[must_use]
    pub fn vars(&self) -> &[(String, OsString)] {
        &self.vars
    }

    /// Looks up one variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OsString> {
        self.vars.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Shared, read-only host context.
pub struct AppContext {
    config: HostConfig,
    paths: AppPaths,
    endpoint: ServiceEndpoint,
    process_env: ProcessEnvironment,
    log_sink: Arc<dyn LogSink>,
}

impl AppContext {
    /// Validates the configuration and assembles the context.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: HostConfig,
        paths: AppPaths,
        process_env: ProcessEnvironment,
        log_sink: Arc<dyn LogSink>,
    ) -> HostResult<Self> {
        config.validate()?;
        let endpoint = ServiceEndpoint::from_config(&config.server)?;

        Ok(Self {
            config,
            paths,
            endpoint,
            process_env,
            log_sink,
        })
    }

    /// Host configuration.
    #[must_use]
    pub const fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Resolved directories.
    #[must_use]
    pub const fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// The single UI origin.
    #[must_use]
    pub const fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Environment for spawned processes.
    #[must_use]
    pub const fn process_env(&self) -> &ProcessEnvironment {
        &self.process_env
    }

    /// Sink for UI-forwarded log lines.
    #[must_use]
    pub fn log_sink(&self) -> &dyn LogSink {
        self.log_sink.as_ref()
    }

    /// Derives the constant catalogue from the immutable context.
    #[must_use]
    pub fn constants(&self) -> ConstantCatalogue {
        ConstantRegistry::build(&self.config, &self.paths, &self.endpoint)
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("endpoint", &self.endpoint)
            .field("profile", &self.config.profile)
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}
