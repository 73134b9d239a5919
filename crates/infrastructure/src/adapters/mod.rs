//! Port adapters backed by platform services.

mod rfd_dialogs;
mod std_process;
mod tracing_sink;

pub use rfd_dialogs::RfdFileDialogs;
pub use std_process::{StdChildProcess, StdProcessLauncher};
pub use tracing_sink::{TracingLogSink, UI_LOG_TARGET};
