//! Lifecycle Coordinator
//!
//! Owns the background threads and drives the host through
//! `INIT -> STARTING -> RUNNING -> STOPPING -> TERMINATED`.
//!
//! Startup brings the asset server up first and waits for it to report
//! the bound address; only then is the dev supervisor started (development
//! profile) and the window allowed to open. Shutdown always runs every
//! step, even when an earlier one fails.

use std::net::SocketAddr;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use fcut_domain::LifecycleState;

use crate::{
    AppContext, AssetServer, CallBridge, DevProcessSupervisor, HostError, HostResult, ProcessLauncher,
    ProcessSlot, ShutdownTrigger, SupervisorExit, TerminationOutcome, WindowHost, WindowTarget,
    terminate,
};

/// What `shutdown` actually did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    /// This call set the shutdown signal.
    pub signal_set: bool,
    /// Outcome of stopping the dev process, if one was running.
    pub termination: Option<TerminationOutcome>,
    /// The supervisor thread was joined by this call.
    pub supervisor_joined: bool,
    /// The server thread was joined by this call.
    pub server_joined: bool,
}

/// Starts, runs and stops the host.
pub struct LifecycleCoordinator {
    context: Arc<AppContext>,
    state: LifecycleState,
    trigger: ShutdownTrigger,
    server: Option<Box<dyn AssetServer>>,
    launcher: Option<Box<dyn ProcessLauncher>>,
    server_thread: Option<JoinHandle<HostResult<()>>>,
    supervisor_thread: Option<JoinHandle<SupervisorExit>>,
    process_slot: ProcessSlot,
    bound_addr: Option<SocketAddr>,
}

impl LifecycleCoordinator {
    /// Creates a coordinator in `INIT`.
    ///
    /// `launcher` is only used in the development profile.
    #[must_use]
    pub fn new(
        context: Arc<AppContext>,
        server: Box<dyn AssetServer>,
        launcher: Option<Box<dyn ProcessLauncher>>,
    ) -> Self {
        Self {
            context,
            state: LifecycleState::Init,
            trigger: ShutdownTrigger::new(),
            server: Some(server),
            launcher,
            server_thread: None,
            supervisor_thread: None,
            process_slot: ProcessSlot::default(),
            bound_addr: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Address the server reported once ready.
    #[must_use]
    pub const fn bound_addr(&self) -> Option<SocketAddr> {
        self.bound_addr
    }

    /// Shared context.
    #[must_use]
    pub fn context(&self) -> &Arc<AppContext> {
        &self.context
    }

    /// Brings up the background services.
    ///
    /// On error the coordinator stays in `STARTING`; call
    /// [`shutdown`](Self::shutdown) to release whatever did start.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind, does not report
    /// readiness in time, or binds an address other than the endpoint.
    pub fn start(&mut self) -> HostResult<()> {
        self.state = self.state.advance(LifecycleState::Starting)?;
        tracing::info!(endpoint = %self.context.endpoint(), "starting host services");

        let addr = self.start_server()?;
        self.bound_addr = Some(addr);
        tracing::info!(%addr, "asset server ready");

        if self.context.config().profile.is_development() {
            self.start_supervisor()?;
        }

        self.state = self.state.advance(LifecycleState::Running)?;
        Ok(())
    }

    fn start_server(&mut self) -> HostResult<SocketAddr> {
        let server = self
            .server
            .take()
            .ok_or_else(|| HostError::Internal("asset server already started".to_string()))?;
        let endpoint = self.context.endpoint().clone();
        let signal = self.trigger.signal();
        let (ready_tx, ready_rx) = mpsc::sync_channel(1);

        let handle = thread::Builder::new()
            .name("asset-server".to_string())
            .spawn(move || {
                let result = server.serve(endpoint, signal, ready_tx);
                if let Err(e) = &result {
                    tracing::error!("asset server stopped: {e}");
                }
                result
            })
            .map_err(|e| HostError::ServerStartup(format!("cannot spawn server thread: {e}")))?;
        self.server_thread = Some(handle);

        let timeout = Duration::from_millis(self.context.config().server.ready_timeout_ms);
        let addr = match ready_rx.recv_timeout(timeout) {
            Ok(result) => result?,
            Err(RecvTimeoutError::Timeout) => {
                return Err(HostError::ServerStartup(format!(
                    "server did not report readiness within {timeout:?}"
                )));
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(HostError::ServerStartup(
                    "server thread exited before reporting readiness".to_string(),
                ));
            }
        };

        let endpoint = self.context.endpoint();
        if !endpoint.matches(addr) {
            return Err(HostError::ServerStartup(format!(
                "server bound {addr}, expected {}",
                endpoint.socket_addr()
            )));
        }
        Ok(addr)
    }

    fn start_supervisor(&mut self) -> HostResult<()> {
        let Some(launcher) = self.launcher.take() else {
            tracing::warn!("development profile without a dev process launcher");
            return Ok(());
        };

        let poll = Duration::from_millis(self.context.config().dev.poll_interval_ms);
        let supervisor = DevProcessSupervisor::new(
            launcher,
            Arc::clone(&self.process_slot),
            self.trigger.signal(),
            poll,
        );
        self.supervisor_thread = Some(supervisor.spawn()?);
        Ok(())
    }

    /// Shows the window and blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if called before a successful `start` or if the
    /// window host fails.
    pub fn run(&self, host: Box<dyn WindowHost>, bridge: Arc<CallBridge>) -> HostResult<()> {
        if self.state != LifecycleState::Running {
            return Err(HostError::Internal(format!(
                "cannot open the window in state {}",
                self.state
            )));
        }

        let target = WindowTarget::from_context(&self.context)?;
        tracing::info!(url = %target.url, "opening window");
        let result = host.run(&target, bridge);
        tracing::info!("window closed");
        result
    }

    /// Stops everything that was started.
    ///
    /// Sets the signal, lets the supervisor return, terminates the dev
    /// process with the configured grace period, then joins the server.
    /// Each step runs regardless of earlier failures. A second call does
    /// nothing.
    pub fn shutdown(&mut self) -> ShutdownReport {
        match self.state {
            LifecycleState::Stopping | LifecycleState::Terminated => {
                return ShutdownReport::default();
            }
            LifecycleState::Init => {
                // Nothing was started.
                self.trigger.fire();
                self.state = LifecycleState::Terminated;
                return ShutdownReport::default();
            }
            LifecycleState::Starting | LifecycleState::Running => {}
        }
        self.transition(LifecycleState::Stopping);

        let mut report = ShutdownReport {
            signal_set: self.trigger.fire(),
            ..ShutdownReport::default()
        };
        tracing::info!("shutdown requested");

        // The supervisor is joined before the dev process is stopped, not
        // after: once it has returned it cannot put a late-spawned process
        // into the slot, so the termination below sees the final handle.
        // It only polls, so the join returns as soon as the signal is set.
        if let Some(handle) = self.supervisor_thread.take() {
            match handle.join() {
                Ok(exit) => {
                    tracing::debug!(?exit, "supervisor thread joined");
                    report.supervisor_joined = true;
                }
                Err(_) => tracing::error!("supervisor thread panicked"),
            }
        }

        let process = self
            .process_slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut process) = process {
            let grace = Duration::from_millis(self.context.config().dev.grace_period_ms);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| terminate(&mut process, grace)))
                .unwrap_or_else(|_| {
                    TerminationOutcome::KillFailed("termination panicked".to_string())
                });
            match &outcome {
                TerminationOutcome::KillFailed(reason) => {
                    tracing::error!(pid = process.id(), "dev process could not be stopped: {reason}");
                }
                other => tracing::info!(pid = process.id(), outcome = ?other, "dev process stopped"),
            }
            report.termination = Some(outcome);
        }

        if let Some(handle) = self.server_thread.take() {
            match handle.join() {
                Ok(_) => {
                    tracing::debug!("server thread joined");
                    report.server_joined = true;
                }
                Err(_) => tracing::error!("server thread panicked"),
            }
        }

        self.transition(LifecycleState::Terminated);
        tracing::info!(?report, "host stopped");
        report
    }

    fn transition(&mut self, to: LifecycleState) {
        match self.state.advance(to) {
            Ok(next) => self.state = next,
            Err(e) => tracing::error!("{e}"),
        }
    }
}

impl Drop for LifecycleCoordinator {
    fn drop(&mut self) {
        if matches!(
            self.state,
            LifecycleState::Starting | LifecycleState::Running
        ) {
            self.shutdown();
        }
    }
}
