//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::notifier::{LogNotifier, NotifierRegistry};
use crate::application::robot::{AlgorithmCatalog, Robot};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::orchestration::{Orchestrator, OrchestratorBuilder};
use crate::infrastructure::venue::VenueCatalog;
use crate::port::Notifier;

/// Build notifier registry from configuration.
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    if config.notifier.log {
        registry.register(Box::new(LogNotifier));
    }
    registry
}

/// Wire the default session: the robot as both decision engines, the
/// configured notifiers, and the given venue connectors.
///
/// # Errors
///
/// Returns an error if a configured algorithm is not in `algorithms`.
pub fn build_orchestrator(
    config: Config,
    venues: VenueCatalog,
    algorithms: &AlgorithmCatalog,
) -> Result<Orchestrator> {
    let notifiers = build_notifier_registry(&config);
    info!(notifiers = notifiers.len(), "Notifiers initialized");
    let notifier: Arc<dyn Notifier> = Arc::new(notifiers);

    let robot = Arc::new(Robot::from_config(
        &config.robot,
        algorithms,
        Arc::clone(&notifier),
    )?);

    OrchestratorBuilder::new(config)
        .venue_catalog(venues)
        .trade_engine(robot.clone())
        .arbitrage_engine(robot)
        .notifier(notifier)
        .build()
}
