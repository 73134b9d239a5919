//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the host core and the platform.
//! Each port is a trait implemented by adapters in the infrastructure or
//! UI layers, and by fakes in tests.

mod asset_server;
mod dialogs;
mod log_sink;
mod process;
mod window;

pub use asset_server::{AssetServer, ReadySender};
pub use dialogs::{FileDialogs, FileFilter};
pub use log_sink::{LogSink, SinkError};
pub use process::{ChildProcess, ProcessExit, ProcessLauncher};
pub use window::{WindowHost, WindowTarget};
