//! Notifier port for event notifications.
//!
//! This module defines the trait for sending human-readable notifications
//! about session lifecycle events and alerts raised by algorithms.

use std::fmt;

/// How loudly an alert should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Free-form alert, typically raised by an algorithm.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub severity: Severity,
    /// Who raised the alert (algorithm or component name).
    pub source: String,
    pub message: String,
}

impl AlertEvent {
    pub fn new(severity: Severity, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            source: source.into(),
            message: message.into(),
        }
    }
}

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// Alert raised by an algorithm or component.
    Alert(AlertEvent),
    /// A venue connector was constructed and initialized.
    VenueConnected { venue: String },
    /// Streaming opened for every context of every venue.
    StreamingStarted { venues: usize, contexts: usize },
    /// Streaming could not be started and was rolled back.
    StreamingFailed { reason: String },
    /// The arbitrage loop is running.
    ArbitrageStarted { venues: usize },
    /// The arbitrage engine could not be created.
    ArbitrageFailed { reason: String },
    /// The session was stopped.
    Stopped {
        /// Number of non-fatal teardown errors.
        errors: usize,
    },
}

/// Trait for notification handlers.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `notify` is called from async contexts and must return quickly; spawn
///   a task for slow transports
pub trait Notifier: Send + Sync {
    fn notify(&self, event: Event);
}
