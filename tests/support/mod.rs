#![allow(dead_code)]

use std::sync::Arc;

use conductor::infrastructure::config::settings::Config;
use conductor::infrastructure::orchestration::{Orchestrator, OrchestratorBuilder};
use conductor::infrastructure::venue::VenueCatalog;
use conductor::port::{ArbitrageEngine, Notifier, TradeEngine, Venue};
use conductor::testkit::engine::{CountingArbitrageEngine, CountingTradeEngine};
use conductor::testkit::notifier::RecordingNotifier;
use conductor::testkit::venue::ScriptedVenue;

/// Configuration enabling every venue in `venues`, with the server disabled.
pub fn config_for(venues: &[&str]) -> Config {
    let mut toml = String::new();
    for name in venues {
        toml.push_str(&format!("[venues.{name}]\nenabled = true\n"));
    }
    Config::parse_toml(&toml).expect("valid test config")
}

/// Same as [`config_for`], plus a control-plane server on an ephemeral port.
pub fn config_with_server(venues: &[&str]) -> Config {
    let mut config = config_for(venues);
    config.server.addr = "127.0.0.1:0".to_string();
    config.server.startup_grace_ms = 50;
    config
}

/// Catalog whose constructors hand out the given (shared) venues.
pub fn catalog_of(venues: &[Arc<ScriptedVenue>]) -> VenueCatalog {
    let mut catalog = VenueCatalog::new();
    for venue in venues {
        let shared = Arc::clone(venue);
        catalog.register(venue.name().to_string(), move |_config| {
            let venue: Arc<dyn Venue> = shared.clone();
            Ok(venue)
        });
    }
    catalog
}

/// An orchestrator wired to counting engines and a recording notifier.
pub struct Session {
    pub orchestrator: Orchestrator,
    pub trade: Arc<CountingTradeEngine>,
    pub arbitrage: Arc<CountingArbitrageEngine>,
    pub notifier: RecordingNotifier,
}

pub fn session(
    config: Config,
    venues: &[Arc<ScriptedVenue>],
    trade: CountingTradeEngine,
    arbitrage: CountingArbitrageEngine,
) -> Session {
    let trade = Arc::new(trade);
    let arbitrage = Arc::new(arbitrage);
    let notifier = RecordingNotifier::new();

    let trade_engine: Arc<dyn TradeEngine> = trade.clone();
    let arbitrage_engine: Arc<dyn ArbitrageEngine> = arbitrage.clone();
    let sink: Arc<dyn Notifier> = Arc::new(notifier.clone());

    let orchestrator = OrchestratorBuilder::new(config)
        .venue_catalog(catalog_of(venues))
        .trade_engine(trade_engine)
        .arbitrage_engine(arbitrage_engine)
        .notifier(sink)
        .build()
        .expect("build orchestrator");

    Session {
        orchestrator,
        trade,
        arbitrage,
        notifier,
    }
}

pub fn default_session(config: Config, venues: &[Arc<ScriptedVenue>]) -> Session {
    session(
        config,
        venues,
        CountingTradeEngine::new(),
        CountingArbitrageEngine::new(),
    )
}
