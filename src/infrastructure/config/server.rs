//! Control-plane server configuration.

use std::time::Duration;

use serde::Deserialize;

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address as `host:port`. Empty disables the server.
    pub addr: String,

    /// Trace every request at debug level.
    pub debug: bool,

    /// How long `start` waits for an early serve failure before reporting
    /// success.
    pub startup_grace_ms: u64,

    /// Requests still unanswered after this long get `408 Request Timeout`.
    pub request_timeout_ms: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.addr.trim().is_empty()
    }

    #[must_use]
    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: String::new(),
            debug: false,
            startup_grace_ms: 1000,
            request_timeout_ms: 60_000,
        }
    }
}
