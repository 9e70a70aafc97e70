//! Robot (decision engine) configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use super::section::Section;

/// Settings for one algorithm.
pub type AlgorithmConfig<'a> = Section<'a>;

/// Period of the arbitrage loop unless configured otherwise.
pub const DEFAULT_ARBITRAGE_INTERVAL_MS: u64 = 500;

/// `[robot]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Trade algorithms instantiated for every trade context, in order.
    pub trade_algorithms: Vec<String>,

    /// Arbitrage algorithms instantiated once per session, in order.
    pub arbitrage_algorithms: Vec<String>,

    /// Arbitrage loop period in milliseconds.
    pub arbitrage_interval_ms: u64,

    /// `[robot.settings.<algorithm>]` tables.
    pub settings: BTreeMap<String, toml::Table>,
}

impl RobotConfig {
    #[must_use]
    pub fn arbitrage_interval(&self) -> Duration {
        Duration::from_millis(self.arbitrage_interval_ms)
    }

    /// Settings for `name`; an empty section when none are configured.
    #[must_use]
    pub fn algorithm_settings<'a>(&'a self, name: &'a str) -> AlgorithmConfig<'a> {
        static EMPTY: std::sync::OnceLock<toml::Table> = std::sync::OnceLock::new();
        match self.settings.get(name) {
            Some(table) => Section::new(name, table),
            None => Section::new(name, EMPTY.get_or_init(toml::Table::new)),
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            trade_algorithms: Vec::new(),
            arbitrage_algorithms: Vec::new(),
            arbitrage_interval_ms: DEFAULT_ARBITRAGE_INTERVAL_MS,
            settings: BTreeMap::new(),
        }
    }
}
