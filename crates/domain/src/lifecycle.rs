//! Host lifecycle state machine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// One-directional host lifecycle:
/// `Init -> Starting -> Running -> Stopping -> Terminated`.
///
/// `Starting -> Stopping` is allowed so a failed startup can still be
/// shut down; nothing ever moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Constructed, nothing started.
    #[default]
    Init,
    /// Background services are being brought up.
    Starting,
    /// The native event loop is active.
    Running,
    /// Shutdown sequence in progress.
    Stopping,
    /// All spawned work joined.
    Terminated,
}

impl LifecycleState {
    /// Returns the next state if `to` is a legal successor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` for any other move.
    pub fn advance(self, to: Self) -> DomainResult<Self> {
        let legal = matches!(
            (self, to),
            (Self::Init, Self::Starting)
                | (Self::Starting, Self::Running)
                | (Self::Starting | Self::Running, Self::Stopping)
                | (Self::Stopping, Self::Terminated)
        );

        if legal {
            Ok(to)
        } else {
            Err(DomainError::InvalidTransition {
                from: self.to_string(),
                to: to.to_string(),
            })
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "INIT",
            Self::Starting => "STARTING",
            Self::Running => "RUNNING",
            Self::Stopping => "STOPPING",
            Self::Terminated => "TERMINATED",
        };
        f.write_str(name)
    }
}
