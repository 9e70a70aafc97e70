//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; every section is optional.
//!
//! # Example
//!
//! ```no_run
//! use conductor::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::notifier::NotifierConfig;
use super::robot::RobotConfig;
use super::server::ServerConfig;
use super::venue::VenuesConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Control-plane HTTP server.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Venue-specific tables, keyed by venue name.
    ///
    /// A venue without a table (or with an empty one) is not connected.
    #[serde(default)]
    pub venues: VenuesConfig,

    /// Decision-engine configuration.
    #[serde(default)]
    pub robot: RobotConfig,

    /// Notification configuration.
    #[serde(default)]
    pub notifier: NotifierConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.server.is_enabled() {
            validate_addr(&self.server.addr)?;
        }
        if self.server.startup_grace_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "startup_grace_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.robot.arbitrage_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "arbitrage_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        check_unique("trade_algorithms", &self.robot.trade_algorithms)?;
        check_unique("arbitrage_algorithms", &self.robot.arbitrage_algorithms)?;

        for name in self.robot.settings.keys() {
            let listed = self.robot.trade_algorithms.contains(name)
                || self.robot.arbitrage_algorithms.contains(name);
            if !listed {
                return Err(ConfigError::InvalidValue {
                    field: "robot.settings",
                    reason: format!("settings for unlisted algorithm '{name}'"),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn validate_addr(addr: &str) -> Result<()> {
    let invalid = |reason: &str| -> crate::error::Error {
        ConfigError::InvalidValue {
            field: "server.addr",
            reason: format!("'{addr}': {reason}"),
        }
        .into()
    };

    let addr = addr.trim();
    if addr.parse::<SocketAddr>().is_ok() {
        return Ok(());
    }

    let Some((host, port)) = addr.rsplit_once(':') else {
        return Err(invalid("expected host:port"));
    };
    if host.is_empty() {
        return Err(invalid("host is empty"));
    }
    if port.parse::<u16>().is_err() {
        return Err(invalid("port is not a number in 0..=65535"));
    }
    if !is_hostname(host) {
        return Err(invalid("host is neither an IP address nor a hostname"));
    }
    Ok(())
}

/// Dot-separated labels of ASCII letters, digits and inner hyphens.
fn is_hostname(host: &str) -> bool {
    host.len() <= 253
        && host.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}

fn check_unique(field: &'static str, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::InvalidValue {
                field,
                reason: format!("'{name}' listed more than once"),
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert!(!config.server.is_enabled());
        assert_eq!(config.server.startup_grace_ms, 1000);
        assert_eq!(config.server.request_timeout().as_secs(), 60);
        assert_eq!(config.robot.arbitrage_interval_ms, 500);
        assert!(config.notifier.log);
        assert!(config.venues.is_empty());
    }

    #[test]
    fn rejects_addr_without_port() {
        let err = Config::parse_toml("[server]\naddr = \"localhost\"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "server.addr",
                ..
            })
        ));
    }

    #[test]
    fn rejects_addr_without_host() {
        assert!(Config::parse_toml("[server]\naddr = \":8080\"\n").is_err());
    }

    #[test]
    fn rejects_host_that_is_not_a_hostname() {
        for addr in ["exa mple:80", "bad_host:80", "-edge.example:80", "a..b:80"] {
            let err = Config::parse_toml(&format!("[server]\naddr = \"{addr}\"\n")).unwrap_err();
            assert!(err.to_string().contains("server.addr"), "{addr}: {err}");
        }
    }

    #[test]
    fn accepts_hostname_addr() {
        let config = Config::parse_toml("[server]\naddr = \"control.local:9000\"\n").unwrap();
        assert!(config.server.is_enabled());
        Config::parse_toml("[server]\naddr = \"localhost:0\"\n").unwrap();
    }

    #[test]
    fn rejects_zero_request_timeout() {
        let err = Config::parse_toml("[server]\nrequest_timeout_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("request_timeout_ms"));
    }

    #[test]
    fn accepts_ipv6_addr() {
        let config = Config::parse_toml("[server]\naddr = \"[::1]:8080\"\n").unwrap();
        assert!(config.server.is_enabled());
    }

    #[test]
    fn rejects_zero_interval() {
        let err = Config::parse_toml("[robot]\narbitrage_interval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("arbitrage_interval_ms"));
    }

    #[test]
    fn rejects_duplicate_algorithm() {
        let err =
            Config::parse_toml("[robot]\ntrade_algorithms = [\"spread\", \"spread\"]\n")
                .unwrap_err();
        assert!(err.to_string().contains("spread"));
    }

    #[test]
    fn rejects_settings_for_unlisted_algorithm() {
        let toml = concat!(
            "[robot]\n",
            "trade_algorithms = [\"spread\"]\n",
            "[robot.settings.momentum]\n",
            "window = 10\n",
        );
        assert!(Config::parse_toml(toml).is_err());
    }
}
