//! Host log sink port

use fcut_domain::LogLevel;

/// The sink could not accept a line.
#[derive(Debug, Clone, thiserror::Error)]
#[error("log sink unavailable: {0}")]
pub struct SinkError(pub String);

/// Destination for log lines forwarded from the UI.
pub trait LogSink: Send + Sync {
    /// Writes one line at `level`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink is unavailable.
    fn write(&self, level: LogLevel, message: &str) -> Result<(), SinkError>;
}
