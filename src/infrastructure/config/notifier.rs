//! Notifier configuration.

use serde::Deserialize;

/// `[notifier]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Log every notification through `tracing`.
    pub log: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self { log: true }
    }
}
