//! Process adapter over `std::process`.

use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};

use fcut_application::{
    AppContext, ChildProcess, HostError, HostResult, ProcessEnvironment, ProcessExit,
    ProcessLauncher,
};

/// Launches the frontend dev process with the host's child environment.
#[derive(Debug, Clone)]
pub struct StdProcessLauncher {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
    env: ProcessEnvironment,
}

impl StdProcessLauncher {
    /// Creates a launcher for an arbitrary command.
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        working_dir: PathBuf,
        env: ProcessEnvironment,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir,
            env,
        }
    }

    /// Launcher for the configured dev command, run in the UI source tree.
    #[must_use]
    pub fn from_context(context: &AppContext) -> Self {
        let config = context.config();
        Self::new(
            config.dev.program.clone(),
            config.dev.args.clone(),
            context.paths().resolve(&config.ui.source_dir),
            context.process_env().clone(),
        )
    }
}

impl ProcessLauncher for StdProcessLauncher {
    fn launch(&self) -> HostResult<Box<dyn ChildProcess>> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .envs(self.env.vars().iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| HostError::Spawn(format!("{}: {e}", self.describe())))?;

        Ok(Box::new(StdChildProcess { child }))
    }

    fn describe(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// A spawned OS process.
#[derive(Debug)]
pub struct StdChildProcess {
    child: Child,
}

fn exit_of(status: ExitStatus) -> ProcessExit {
    ProcessExit {
        code: status.code(),
    }
}

impl ChildProcess for StdChildProcess {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn try_wait(&mut self) -> HostResult<Option<ProcessExit>> {
        self.child
            .try_wait()
            .map(|status| status.map(exit_of))
            .map_err(|e| HostError::Process(e.to_string()))
    }

    #[cfg(unix)]
    #[allow(unsafe_code)]
    fn request_terminate(&mut self) -> HostResult<()> {
        let pid = libc::pid_t::try_from(self.child.id())
            .map_err(|e| HostError::Process(format!("pid out of range: {e}")))?;
        // SAFETY: `kill` has no memory-safety preconditions. The pid belongs
        // to a child we have not reaped yet, so it cannot have been reused.
        let rc = unsafe { libc::kill(pid, libc::SIGTERM) };
        if rc == 0 {
            Ok(())
        } else {
            Err(HostError::Process(format!(
                "SIGTERM to {pid} failed: {}",
                std::io::Error::last_os_error()
            )))
        }
    }

    #[cfg(windows)]
    fn request_terminate(&mut self) -> HostResult<()> {
        // Without /F, taskkill asks the process tree to close.
        let status = Command::new("taskkill")
            .args(["/PID", &self.child.id().to_string(), "/T"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| HostError::Process(format!("taskkill: {e}")))?;
        if status.success() {
            Ok(())
        } else {
            Err(HostError::Process(format!("taskkill exited with {status}")))
        }
    }

    #[cfg(not(any(unix, windows)))]
    fn request_terminate(&mut self) -> HostResult<()> {
        Err(HostError::Process(
            "graceful termination is not supported on this platform".to_string(),
        ))
    }

    fn kill(&mut self) -> HostResult<()> {
        self.child
            .kill()
            .map_err(|e| HostError::Process(e.to_string()))
    }

    fn wait(&mut self) -> HostResult<ProcessExit> {
        self.child
            .wait()
            .map(exit_of)
            .map_err(|e| HostError::Process(e.to_string()))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use fcut_application::{SupervisedProcess, TerminationOutcome, terminate};
    use std::time::Duration;

    fn sh(script: &str) -> StdProcessLauncher {
        StdProcessLauncher::new(
            "sh",
            vec!["-c".to_string(), script.to_string()],
            std::env::temp_dir(),
            ProcessEnvironment::default(),
        )
    }

    #[test]
    fn describe_joins_command_line() {
        assert_eq!(sh("true").describe(), "sh -c true");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let launcher = StdProcessLauncher::new(
            "definitely-not-a-real-program-fcut",
            Vec::new(),
            std::env::temp_dir(),
            ProcessEnvironment::default(),
        );
        assert!(matches!(launcher.launch(), Err(HostError::Spawn(_))));
    }

    #[test]
    fn sigterm_stops_cooperative_process() {
        let child = sh("sleep 30").launch().expect("spawn");
        let mut process = SupervisedProcess::new(child);

        let outcome = terminate(&mut process, Duration::from_secs(5));
        assert!(matches!(outcome, TerminationOutcome::Graceful(_)));
    }

    #[test]
    fn process_ignoring_sigterm_is_killed() {
        let child = sh("trap '' TERM; while true; do sleep 1; done")
            .launch()
            .expect("spawn");
        let mut process = SupervisedProcess::new(child);
        // Give the shell time to install the trap.
        std::thread::sleep(Duration::from_millis(200));

        let outcome = terminate(&mut process, Duration::from_millis(300));
        assert!(matches!(outcome, TerminationOutcome::Killed(_)));
    }

    #[test]
    fn finished_process_reports_exit_code() {
        let mut child = sh("exit 3").launch().expect("spawn");
        let exit = child.wait().expect("wait");
        assert_eq!(exit.code, Some(3));
        assert_eq!(child.try_wait().expect("try_wait"), Some(ProcessExit { code: Some(3) }));
    }
}
