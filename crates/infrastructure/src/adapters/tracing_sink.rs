//! Log sink adapter writing UI log lines into the host log.

use fcut_application::{LogSink, SinkError};
use fcut_domain::LogLevel;

/// Target under which UI-forwarded lines are recorded.
pub const UI_LOG_TARGET: &str = "fcut::ui";

/// Forwards UI log lines to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl TracingLogSink {
    /// Creates a new sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LogSink for TracingLogSink {
    fn write(&self, level: LogLevel, message: &str) -> Result<(), SinkError> {
        match level {
            LogLevel::Debug => tracing::debug!(target: UI_LOG_TARGET, "{message}"),
            LogLevel::Info => tracing::info!(target: UI_LOG_TARGET, "{message}"),
            LogLevel::Warning => tracing::warn!(target: UI_LOG_TARGET, "{message}"),
            LogLevel::Error => tracing::error!(target: UI_LOG_TARGET, "{message}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_level_without_subscriber() {
        let sink = TracingLogSink::new();
        for level in [
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
        ] {
            assert!(sink.write(level, "line").is_ok());
        }
    }
}
