//! FCut Application - Host orchestration and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for windows, dialogs, servers and processes)
//! - The call bridge, dev process supervisor and lifecycle coordinator
//! - Application-level error handling

pub mod call_bridge;
pub mod context;
pub mod coordinator;
pub mod error;
pub mod ports;
pub mod shutdown;
pub mod supervisor;

pub use call_bridge::{CallBridge, PING_REPLY, media_filters};
pub use context::{AppContext, ProcessEnvironment};
pub use coordinator::{LifecycleCoordinator, ShutdownReport};
pub use error::{HostError, HostResult};
pub use ports::{
    AssetServer, ChildProcess, FileDialogs, FileFilter, LogSink, ProcessExit, ProcessLauncher,
    ReadySender, SinkError, WindowHost, WindowTarget,
};
pub use shutdown::{ShutdownSignal, ShutdownTrigger};
pub use supervisor::{
    DevProcessSupervisor, ProcessSlot, SupervisedProcess, SupervisorExit, TerminationOutcome,
    terminate,
};
