use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;

use super::*;
use crate::infrastructure::config::robot::AlgorithmConfig;
use crate::port::Event;
use crate::testkit::algorithm::{
    CallLog, Failures, ScriptedArbitrageAlgorithm, ScriptedTradeAlgorithm,
};
use crate::testkit::notifier::RecordingNotifier;
use crate::testkit::venue::StaticContext;

fn catalog(log: &CallLog, algorithms: &[(&'static str, Failures)]) -> AlgorithmCatalog {
    let mut catalog = AlgorithmCatalog::new();
    for (name, failures) in algorithms {
        let name: &'static str = *name;
        let (trade_log, trade_failures) = (log.clone(), failures.clone());
        catalog.register_trade(name, move |_config: AlgorithmConfig<'_>| {
            let algorithm: Box<dyn TradeAlgorithm> = Box::new(ScriptedTradeAlgorithm::new(
                name,
                trade_log.clone(),
                trade_failures.clone(),
            ));
            Ok(algorithm)
        });
        let (arbitrage_log, arbitrage_failures) = (log.clone(), failures.clone());
        catalog.register_arbitrage(name, move |_config: AlgorithmConfig<'_>| {
            let algorithm: Box<dyn ArbitrageAlgorithm> = Box::new(
                ScriptedArbitrageAlgorithm::new(
                    name,
                    arbitrage_log.clone(),
                    arbitrage_failures.clone(),
                ),
            );
            Ok(algorithm)
        });
    }
    catalog
}

fn trade_config(names: &[&str]) -> RobotConfig {
    RobotConfig {
        trade_algorithms: names.iter().map(|n| (*n).to_string()).collect(),
        ..RobotConfig::default()
    }
}

fn arbitrage_config(names: &[&str]) -> RobotConfig {
    RobotConfig {
        arbitrage_algorithms: names.iter().map(|n| (*n).to_string()).collect(),
        ..RobotConfig::default()
    }
}

fn robot(config: &RobotConfig, catalog: &AlgorithmCatalog) -> Robot {
    Robot::from_config(config, catalog, Arc::new(RecordingNotifier::new())).unwrap()
}

#[tokio::test]
async fn create_update_destroy_drives_every_algorithm() {
    let log = CallLog::new();
    let catalog = catalog(&log, &[("a", Failures::none()), ("b", Failures::none())]);
    let robot = robot(&trade_config(&["a", "b"]), &catalog);
    let context = StaticContext::shared("alpha", "alpha_btc");
    let id = context.id();

    TradeEngine::create(&robot, &id, &context).await.unwrap();
    assert_eq!(robot.active_contexts(), 1);
    TradeEngine::update(&robot, &id, &context).await.unwrap();
    TradeEngine::destroy(&robot, &id, &context).await.unwrap();

    assert_eq!(
        log.calls(),
        vec![
            "a:initialize:alpha_btc",
            "b:initialize:alpha_btc",
            "a:update:alpha_btc",
            "b:update:alpha_btc",
            "b:finalize:alpha_btc",
            "a:finalize:alpha_btc",
        ]
    );
    assert_eq!(robot.active_contexts(), 0);
}

#[tokio::test]
async fn duplicate_create_keeps_a_single_set() {
    let log = CallLog::new();
    let catalog = catalog(&log, &[("a", Failures::none())]);
    let robot = robot(&trade_config(&["a"]), &catalog);
    let context = StaticContext::shared("alpha", "alpha_btc");
    let id = context.id();

    TradeEngine::create(&robot, &id, &context).await.unwrap();
    let err = TradeEngine::create(&robot, &id, &context).await.unwrap_err();

    assert!(matches!(err, Error::EngineExists(ref key) if key == "alpha_btc"));
    assert_eq!(robot.active_contexts(), 1);
    assert_eq!(log.stage("initialize").len(), 1);
}

#[tokio::test]
async fn destroy_of_unknown_id_is_tolerated() {
    let log = CallLog::new();
    let catalog = catalog(&log, &[("a", Failures::none())]);
    let robot = robot(&trade_config(&["a"]), &catalog);
    let context = StaticContext::shared("alpha", "never_created");

    TradeEngine::destroy(&robot, &context.id(), &context)
        .await
        .unwrap();
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn update_of_unknown_id_errors() {
    let robot = robot(&trade_config(&[]), &AlgorithmCatalog::new());
    let context = StaticContext::shared("alpha", "ghost");

    let err = TradeEngine::update(&robot, &context.id(), &context)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EngineNotFound(_)));
}

#[tokio::test]
async fn failed_initialize_finalizes_earlier_algorithms() {
    let log = CallLog::new();
    let catalog = catalog(
        &log,
        &[
            ("a", Failures::none()),
            ("b", Failures::none().on("initialize")),
            ("c", Failures::none()),
        ],
    );
    let robot = robot(&trade_config(&["a", "b", "c"]), &catalog);
    let context = StaticContext::shared("alpha", "alpha_btc");

    let err = TradeEngine::create(&robot, &context.id(), &context)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Algorithm { ref name, .. } if name == "b"));
    assert_eq!(log.stage("finalize"), vec!["a:finalize:alpha_btc"]);
    assert!(!log.calls().iter().any(|c| c.starts_with("c:")));
    assert_eq!(robot.active_contexts(), 0);
}

#[tokio::test]
async fn update_failure_still_reaches_every_algorithm() {
    let log = CallLog::new();
    let catalog = catalog(
        &log,
        &[("a", Failures::none().on("update")), ("b", Failures::none())],
    );
    let robot = robot(&trade_config(&["a", "b"]), &catalog);
    let context = StaticContext::shared("alpha", "alpha_btc");
    let id = context.id();

    TradeEngine::create(&robot, &id, &context).await.unwrap();
    let err = TradeEngine::update(&robot, &id, &context).await.unwrap_err();

    assert!(matches!(err, Error::Algorithm { ref name, .. } if name == "a"));
    assert_eq!(log.stage("update").len(), 2);
}

#[tokio::test]
async fn algorithms_receive_the_notifier() {
    let log = CallLog::new();
    let catalog = catalog(&log, &[("a", Failures::none())]);
    let notifier = RecordingNotifier::new();
    let robot = Robot::from_config(
        &trade_config(&["a"]),
        &catalog,
        Arc::new(notifier.clone()),
    )
    .unwrap();
    let context = StaticContext::shared("alpha", "alpha_btc");
    let id = context.id();

    TradeEngine::create(&robot, &id, &context).await.unwrap();
    TradeEngine::update(&robot, &id, &context).await.unwrap();

    assert_eq!(notifier.count(|e| matches!(e, Event::Alert(_))), 1);
}

#[test]
fn unknown_algorithm_is_a_config_error() {
    let err = Robot::from_config(
        &trade_config(&["missing"]),
        &AlgorithmCatalog::new(),
        Arc::new(RecordingNotifier::new()),
    )
    .err()
    .unwrap();

    assert!(matches!(
        err,
        Error::Config(ConfigError::UnknownAlgorithm { kind: "trade", ref name }) if name == "missing"
    ));
}

#[tokio::test]
async fn factories_receive_their_settings() {
    #[derive(Deserialize)]
    struct Threshold {
        limit: u32,
    }

    let seen = Arc::new(Mutex::new(None));
    let mut catalog = AlgorithmCatalog::new();
    let sink = Arc::clone(&seen);
    catalog.register_trade("threshold", move |config: AlgorithmConfig<'_>| {
        let settings: Threshold = config.deserialize()?;
        *sink.lock() = Some(settings.limit);
        let algorithm: Box<dyn TradeAlgorithm> =
            Box::new(ScriptedTradeAlgorithm::new("threshold", CallLog::new(), Failures::none()));
        Ok(algorithm)
    });

    let mut config = trade_config(&["threshold"]);
    config
        .settings
        .insert("threshold".into(), toml::from_str("limit = 7").unwrap());
    let robot = robot(&config, &catalog);
    let context = StaticContext::shared("alpha", "alpha_btc");

    TradeEngine::create(&robot, &context.id(), &context)
        .await
        .unwrap();
    assert_eq!(*seen.lock(), Some(7));
}

#[tokio::test]
async fn arbitrage_set_is_single_instance() {
    let log = CallLog::new();
    let catalog = catalog(&log, &[("cross", Failures::none())]);
    let robot = robot(&arbitrage_config(&["cross"]), &catalog);
    let venues = VenueSet::new();

    ArbitrageEngine::create(&robot, &venues).await.unwrap();
    assert!(robot.arbitrage_active().await);

    let err = ArbitrageEngine::create(&robot, &venues).await.unwrap_err();
    assert!(matches!(err, Error::EngineExists(_)));

    ArbitrageEngine::update(&robot, &venues).await.unwrap();
    ArbitrageEngine::destroy(&robot, &venues).await.unwrap();
    ArbitrageEngine::destroy(&robot, &venues).await.unwrap();

    assert!(!robot.arbitrage_active().await);
    assert_eq!(
        log.calls(),
        vec![
            "cross:initialize:venues",
            "cross:update:venues",
            "cross:finalize:venues",
        ]
    );
}

#[tokio::test]
async fn arbitrage_update_without_create_errors() {
    let robot = robot(&arbitrage_config(&[]), &AlgorithmCatalog::new());
    let err = ArbitrageEngine::update(&robot, &VenueSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EngineNotFound(_)));
}
