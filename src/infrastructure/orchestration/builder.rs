//! Builder for [`Orchestrator`].

use std::sync::Arc;

use super::orchestrator::Orchestrator;
use super::streaming::StreamingManager;
use crate::adapter::inbound::control::ControlPlaneServer;
use crate::adapter::outbound::notifier::NullNotifier;
use crate::application::state::RuntimeStatus;
use crate::domain::Phase;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::venue::VenueCatalog;
use crate::port::{ArbitrageEngine, Notifier, TradeEngine, VenueSet};

/// Assembles an [`Orchestrator`] from configuration and collaborators.
///
/// # Example
///
/// ```ignore
/// let robot = Arc::new(Robot::from_config(&config.robot, &algorithms, notifier.clone())?);
/// let orchestrator = OrchestratorBuilder::new(config)
///     .venue_catalog(venues)
///     .trade_engine(robot.clone())
///     .arbitrage_engine(robot)
///     .notifier(notifier)
///     .build()?;
/// ```
pub struct OrchestratorBuilder {
    config: Config,
    catalog: VenueCatalog,
    trade_engine: Option<Arc<dyn TradeEngine>>,
    arbitrage_engine: Option<Arc<dyn ArbitrageEngine>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl OrchestratorBuilder {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            catalog: VenueCatalog::new(),
            trade_engine: None,
            arbitrage_engine: None,
            notifier: None,
        }
    }

    #[must_use]
    pub fn venue_catalog(mut self, catalog: VenueCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn trade_engine(mut self, engine: Arc<dyn TradeEngine>) -> Self {
        self.trade_engine = Some(engine);
        self
    }

    #[must_use]
    pub fn arbitrage_engine(mut self, engine: Arc<dyn ArbitrageEngine>) -> Self {
        self.arbitrage_engine = Some(engine);
        self
    }

    /// Event sink; defaults to a no-op notifier.
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when an engine was not supplied,
    /// or the validation error of a configuration that was never checked.
    pub fn build(self) -> Result<Orchestrator> {
        self.config.validate()?;
        let trade_engine = self.trade_engine.ok_or(ConfigError::MissingField {
            field: "trade_engine",
        })?;
        let arbitrage_engine = self.arbitrage_engine.ok_or(ConfigError::MissingField {
            field: "arbitrage_engine",
        })?;
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(NullNotifier));

        let status = Arc::new(RuntimeStatus::new());
        let Config {
            server,
            venues,
            robot,
            ..
        } = self.config;

        Ok(Orchestrator {
            venues_config: venues,
            catalog: self.catalog,
            arbitrage_interval: robot.arbitrage_interval(),
            streaming: StreamingManager::new(Arc::clone(&trade_engine)),
            trade_engine,
            arbitrage_engine,
            notifier,
            server: ControlPlaneServer::new(server, Arc::clone(&status)),
            status,
            venues: Arc::new(VenueSet::new()),
            arbitrage: None,
            phase: Phase::Idle,
        })
    }
}
