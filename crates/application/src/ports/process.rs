//! External process ports

use crate::HostResult;

/// How a process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Exit code, if the platform reported one (none when killed by a signal).
    pub code: Option<i32>,
}

impl ProcessExit {
    /// Returns true for a zero exit code.
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Handle to a spawned, long-running process.
pub trait ChildProcess: Send {
    /// OS process id.
    fn id(&self) -> u32;

    /// Non-blocking exit check.
    ///
    /// # Errors
    ///
    /// Returns an error if the process state cannot be queried.
    fn try_wait(&mut self) -> HostResult<Option<ProcessExit>>;

    /// Asks the process to exit (SIGTERM or platform equivalent).
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be delivered.
    fn request_terminate(&mut self) -> HostResult<()>;

    /// Forcibly kills the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the kill could not be delivered.
    fn kill(&mut self) -> HostResult<()>;

    /// Blocks until the process exits.
    ///
    /// # Errors
    ///
    /// Returns an error if waiting fails.
    fn wait(&mut self) -> HostResult<ProcessExit>;
}

/// Spawns the supervised process.
pub trait ProcessLauncher: Send {
    /// Spawns a new process.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Spawn` if the process cannot be started.
    fn launch(&self) -> HostResult<Box<dyn ChildProcess>>;

    /// Human-readable command line for logs.
    fn describe(&self) -> String;
}
