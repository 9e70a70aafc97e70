//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for the built-in backends and the
//! composite registry that fans events out to all of them.

use tracing::{error, info, warn};

use crate::port::outbound::notifier::{Event, Notifier, Severity};

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        self.notify_all(event);
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        match event {
            Event::Alert(alert) => match alert.severity {
                Severity::Info => {
                    info!(source = %alert.source, message = %alert.message, "Alert");
                }
                Severity::Warning => {
                    warn!(source = %alert.source, message = %alert.message, "Alert");
                }
                Severity::Critical => {
                    error!(source = %alert.source, message = %alert.message, "Alert");
                }
            },
            Event::VenueConnected { venue } => {
                info!(venue = %venue, "Venue connected");
            }
            Event::StreamingStarted { venues, contexts } => {
                info!(venues, contexts, "Streaming started");
            }
            Event::StreamingFailed { reason } => {
                warn!(reason = %reason, "Streaming failed");
            }
            Event::ArbitrageStarted { venues } => {
                info!(venues, "Arbitrage started");
            }
            Event::ArbitrageFailed { reason } => {
                warn!(reason = %reason, "Arbitrage failed");
            }
            Event::Stopped { errors } => {
                info!(errors, "Session stopped");
            }
        }
    }
}
