//! Editing actions the UI can configure.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of media-editing task exposed to the UI as constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// User-defined pipeline.
    Custom,
    /// Cut a range.
    Cut,
    /// Change playback speed.
    Speedup,
    /// Jump cut.
    Jumpcut,
    /// Remove silent sections.
    CutSilence,
    /// Remove motionless sections.
    CutMotionless,
}

impl Action {
    /// All actions in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Custom,
        Self::Cut,
        Self::Speedup,
        Self::Jumpcut,
        Self::CutSilence,
        Self::CutMotionless,
    ];

    /// Symbolic name, as used for the catalogue key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Custom => "Custom",
            Self::Cut => "Cut",
            Self::Speedup => "Speedup",
            Self::Jumpcut => "Jumpcut",
            Self::CutSilence => "CutSilence",
            Self::CutMotionless => "CutMotionless",
        }
    }

    /// Wire value, the lower-cased name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Cut => "cut",
            Self::Speedup => "speedup",
            Self::Jumpcut => "jumpcut",
            Self::CutSilence => "cutsilence",
            Self::CutMotionless => "cutmotionless",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
