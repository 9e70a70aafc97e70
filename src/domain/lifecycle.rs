//! Orchestrator lifecycle phases.

use std::fmt;

use serde::Serialize;

/// Lifecycle phase of an orchestrator.
///
/// Transitions only move forward:
/// `Idle -> Initialized -> Running -> Stopping -> Finalized`.
/// `Finalized` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Initialized,
    Running,
    Stopping,
    Finalized,
}

impl Phase {
    /// Lowercase name, as reported by the control plane.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Finalized => "finalized",
        }
    }

    pub(crate) const fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Initialized => 1,
            Self::Running => 2,
            Self::Stopping => 3,
            Self::Finalized => 4,
        }
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Initialized,
            2 => Self::Running,
            3 => Self::Stopping,
            4 => Self::Finalized,
            _ => Self::Idle,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
