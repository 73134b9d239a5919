//! Dev Process Supervisor
//!
//! Runs on its own thread in the development profile. Spawns the frontend
//! build tool once, then polls until either the process exits on its own
//! or the shutdown signal is set. Termination is never done here: the
//! coordinator takes the handle out of the shared [`ProcessSlot`] and
//! escalates with [`terminate`].

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::{ChildProcess, HostError, HostResult, ProcessExit, ProcessLauncher, ShutdownSignal};

/// Interval between exit checks while waiting out the grace period.
const TERMINATE_POLL: Duration = Duration::from_millis(50);

/// A spawned dev process and its bookkeeping.
pub struct SupervisedProcess {
    child: Box<dyn ChildProcess>,
    started_at: Instant,
    terminated: bool,
}

impl SupervisedProcess {
    /// Wraps a freshly spawned child.
    #[must_use]
    pub fn new(child: Box<dyn ChildProcess>) -> Self {
        Self {
            child,
            started_at: Instant::now(),
            terminated: false,
        }
    }

    /// OS process id.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Time since spawn.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Returns true once termination has completed.
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl std::fmt::Debug for SupervisedProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupervisedProcess")
            .field("pid", &self.child.id())
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}

/// Shared handle slot. Written by the supervisor, drained by shutdown.
pub type ProcessSlot = Arc<Mutex<Option<SupervisedProcess>>>;

/// Why the supervisor loop returned.
#[derive(Debug, Clone)]
pub enum SupervisorExit {
    /// Shutdown was requested while the process was running.
    Cancelled,
    /// The process exited on its own.
    ProcessExited(ProcessExit),
    /// The process could not be spawned.
    SpawnFailed(HostError),
}

/// Result of [`terminate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationOutcome {
    /// The process had already exited; nothing was signalled.
    AlreadyExited(ProcessExit),
    /// The process exited within the grace period.
    Graceful(ProcessExit),
    /// The grace period elapsed and the process was killed, or was found
    /// gone while being killed.
    Killed(ProcessExit),
    /// The process could not be stopped.
    KillFailed(String),
}

/// Stops a supervised process.
///
/// Sends a graceful request, waits up to `grace`, then kills and reaps.
/// Calling it again on a terminated process returns `AlreadyExited`.
pub fn terminate(process: &mut SupervisedProcess, grace: Duration) -> TerminationOutcome {
    let pid = process.child.id();

    match process.child.try_wait() {
        Ok(Some(exit)) => {
            process.terminated = true;
            return TerminationOutcome::AlreadyExited(exit);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(pid, "cannot query dev process state: {e}"),
    }

    if let Err(e) = process.child.request_terminate() {
        tracing::warn!(pid, "graceful termination request failed: {e}");
    }

    let deadline = Instant::now() + grace;
    loop {
        match process.child.try_wait() {
            Ok(Some(exit)) => {
                process.terminated = true;
                tracing::info!(pid, ?exit, "dev process exited gracefully");
                return TerminationOutcome::Graceful(exit);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(pid, "cannot query dev process state: {e}");
                break;
            }
        }
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep(TERMINATE_POLL.min(deadline - now));
    }

    tracing::warn!(pid, "dev process did not exit within {grace:?}, killing");
    if let Err(e) = process.child.kill() {
        // The process may have exited between the last poll and the kill.
        // It still outlived the grace period, so this counts as a kill.
        if let Ok(Some(exit)) = process.child.try_wait() {
            process.terminated = true;
            tracing::info!(pid, ?exit, "dev process exited while being killed");
            return TerminationOutcome::Killed(exit);
        }
        return TerminationOutcome::KillFailed(e.to_string());
    }

    match process.child.wait() {
        Ok(exit) => {
            process.terminated = true;
            TerminationOutcome::Killed(exit)
        }
        Err(e) => TerminationOutcome::KillFailed(e.to_string()),
    }
}

/// Supervises one dev process until it exits or shutdown is requested.
pub struct DevProcessSupervisor {
    launcher: Box<dyn ProcessLauncher>,
    slot: ProcessSlot,
    signal: ShutdownSignal,
    poll_interval: Duration,
}

impl DevProcessSupervisor {
    /// Creates a supervisor that publishes its handle into `slot`.
    #[must_use]
    pub fn new(
        launcher: Box<dyn ProcessLauncher>,
        slot: ProcessSlot,
        signal: ShutdownSignal,
        poll_interval: Duration,
    ) -> Self {
        Self {
            launcher,
            slot,
            signal,
            poll_interval,
        }
    }

    /// Runs the supervision loop on the current thread.
    ///
    /// The process is never respawned.
    pub fn run(self) -> SupervisorExit {
        if self.signal.is_set() {
            return SupervisorExit::Cancelled;
        }

        let description = self.launcher.describe();
        let child = match self.launcher.launch() {
            Ok(child) => child,
            Err(e) => {
                tracing::error!("failed to start dev process `{description}`: {e}");
                return SupervisorExit::SpawnFailed(e);
            }
        };
        tracing::info!(pid = child.id(), "dev process started: {description}");

        *self.lock_slot() = Some(SupervisedProcess::new(child));

        loop {
            if self.signal.wait_timeout(self.poll_interval) {
                return SupervisorExit::Cancelled;
            }

            let mut slot = self.lock_slot();
            let Some(process) = slot.as_mut() else {
                // Shutdown already took the handle.
                return SupervisorExit::Cancelled;
            };
            match process.child.try_wait() {
                Ok(Some(exit)) => {
                    tracing::warn!(
                        pid = process.id(),
                        code = ?exit.code,
                        uptime = ?process.uptime(),
                        "dev process exited on its own"
                    );
                    process.terminated = true;
                    return SupervisorExit::ProcessExited(exit);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(pid = process.id(), "cannot poll dev process: {e}"),
            }
        }
    }

    /// Spawns the loop on a named thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be created.
    pub fn spawn(self) -> HostResult<JoinHandle<SupervisorExit>> {
        thread::Builder::new()
            .name("dev-supervisor".to_string())
            .spawn(move || self.run())
            .map_err(|e| HostError::Internal(format!("cannot spawn supervisor thread: {e}")))
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<SupervisedProcess>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted child process shared with the test through `Arc`s.
    #[derive(Default)]
    pub struct FakeState {
        pub alive: Mutex<bool>,
        pub honours_terminate: bool,
        pub terminate_requests: AtomicUsize,
        pub kills: AtomicUsize,
        pub fail_kill: bool,
        /// With `fail_kill`, the process is gone by the time the kill fails.
        pub exits_during_kill: bool,
    }

    pub struct FakeChild {
        pub state: Arc<FakeState>,
    }

    impl FakeChild {
        fn exit(&self) -> ProcessExit {
            ProcessExit { code: Some(0) }
        }
    }

    impl ChildProcess for FakeChild {
        fn id(&self) -> u32 {
            4242
        }

        fn try_wait(&mut self) -> HostResult<Option<ProcessExit>> {
            let alive = *self.state.alive.lock().expect("lock");
            Ok(if alive { None } else { Some(self.exit()) })
        }

        fn request_terminate(&mut self) -> HostResult<()> {
            self.state.terminate_requests.fetch_add(1, Ordering::SeqCst);
            if self.state.honours_terminate {
                *self.state.alive.lock().expect("lock") = false;
            }
            Ok(())
        }

        fn kill(&mut self) -> HostResult<()> {
            self.state.kills.fetch_add(1, Ordering::SeqCst);
            if self.state.fail_kill {
                if self.state.exits_during_kill {
                    *self.state.alive.lock().expect("lock") = false;
                }
                return Err(HostError::Process("permission denied".to_string()));
            }
            *self.state.alive.lock().expect("lock") = false;
            Ok(())
        }

        fn wait(&mut self) -> HostResult<ProcessExit> {
            Ok(ProcessExit { code: None })
        }
    }

    impl FakeState {
        pub fn running(honours_terminate: bool) -> Arc<Self> {
            Arc::new(Self {
                alive: Mutex::new(true),
                honours_terminate,
                ..Self::default()
            })
        }

        pub fn stop(&self) {
            *self.alive.lock().expect("lock") = false;
        }
    }

    pub struct FakeLauncher {
        pub state: Arc<FakeState>,
        pub launches: Arc<AtomicUsize>,
        pub fail: bool,
    }

    impl FakeLauncher {
        pub fn new(state: Arc<FakeState>) -> Self {
            Self {
                state,
                launches: Arc::new(AtomicUsize::new(0)),
                fail: false,
            }
        }
    }

    impl ProcessLauncher for FakeLauncher {
        fn launch(&self) -> HostResult<Box<dyn ChildProcess>> {
            self.launches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(HostError::Spawn("npx: not found".to_string()));
            }
            Ok(Box::new(FakeChild {
                state: Arc::clone(&self.state),
            }))
        }

        fn describe(&self) -> String {
            "npx vite".to_string()
        }
    }
}
