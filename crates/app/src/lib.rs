//! FCut host assembly.
//!
//! Wires the platform adapters into the lifecycle coordinator. `main`
//! resolves configuration and logging, then hands over to [`run_host`].

use std::fs;
use std::sync::Arc;

use fcut_application::{
    AppContext, CallBridge, FileDialogs, HostError, HostResult, LifecycleCoordinator,
    ProcessEnvironment, ProcessLauncher, ShutdownReport, WindowHost,
};
use fcut_domain::{AppPaths, HostConfig};
use fcut_infrastructure::{AxumAssetServer, ServerBackend, StdProcessLauncher, TracingLogSink};

/// Builds the shared context from configuration and resolved paths.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the child
/// environment cannot be built.
pub fn build_context(config: HostConfig, paths: AppPaths) -> HostResult<Arc<AppContext>> {
    let process_env = ProcessEnvironment::derive(
        &paths,
        std::env::var_os("PATH"),
        &config.environment,
    )?;
    let context = AppContext::new(config, paths, process_env, Arc::new(TracingLogSink::new()))?;
    Ok(Arc::new(context))
}

/// Runs the host until the window closes, then shuts everything down.
///
/// Startup failures are fatal: whatever already started is stopped and
/// the error returned.
///
/// # Errors
///
/// Returns an error if startup fails or the window host fails.
pub fn run_host(
    config: HostConfig,
    paths: AppPaths,
    window: Box<dyn WindowHost>,
    dialogs: Arc<dyn FileDialogs>,
) -> HostResult<ShutdownReport> {
    fs::create_dir_all(&paths.app_data).map_err(|e| {
        HostError::Config(format!("cannot create {}: {e}", paths.app_data.display()))
    })?;

    let context = build_context(config, paths)?;
    tracing::info!(?context, "host context ready");

    let server = AxumAssetServer::new(ServerBackend::for_context(&context)?);
    let launcher = context
        .config()
        .profile
        .is_development()
        .then(|| Box::new(StdProcessLauncher::from_context(&context)) as Box<dyn ProcessLauncher>);

    let mut coordinator = LifecycleCoordinator::new(Arc::clone(&context), Box::new(server), launcher);
    if let Err(e) = coordinator.start() {
        tracing::error!("startup failed: {e}");
        coordinator.shutdown();
        return Err(e);
    }

    let bridge = Arc::new(CallBridge::new(context, dialogs));
    let outcome = coordinator.run(window, bridge);
    let report = coordinator.shutdown();

    outcome.map(|()| report)
}
