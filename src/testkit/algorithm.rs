//! Scripted algorithms for testing the robot.
//!
//! Every call is appended to a shared [`CallLog`] as
//! `"<name>:<stage>:<subject>"`, where the subject is the context id for
//! trade algorithms and `venues` for arbitrage algorithms.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::TradeContext;
use crate::error::{Error, Result};
use crate::port::{
    AlertEvent, ArbitrageAlgorithm, Event, Notifier, Severity, TradeAlgorithm, VenueSet,
};

/// Shared, ordered record of algorithm calls.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Calls whose stage matches, e.g. `"finalize"`.
    pub fn stage(&self, stage: &str) -> Vec<String> {
        let needle = format!(":{stage}:");
        self.calls
            .lock()
            .iter()
            .filter(|c| c.contains(&needle))
            .cloned()
            .collect()
    }

    fn record(&self, name: &str, stage: &str, subject: &str) {
        self.calls.lock().push(format!("{name}:{stage}:{subject}"));
    }
}

/// Which stages of a scripted algorithm should fail.
#[derive(Clone, Default)]
pub struct Failures {
    stages: HashSet<&'static str>,
}

impl Failures {
    pub fn none() -> Self {
        Self::default()
    }

    /// Fail the given stage (`"initialize"`, `"update"` or `"finalize"`).
    pub fn on(mut self, stage: &'static str) -> Self {
        self.stages.insert(stage);
        self
    }

    fn check(&self, name: &str, stage: &str) -> Result<()> {
        if self.stages.contains(stage) {
            return Err(Error::Venue(format!("{name} scripted {stage} failure")));
        }
        Ok(())
    }
}

/// Trade algorithm that records its calls and raises an info alert on update.
pub struct ScriptedTradeAlgorithm {
    name: String,
    log: CallLog,
    failures: Failures,
}

impl ScriptedTradeAlgorithm {
    pub fn new(name: impl Into<String>, log: CallLog, failures: Failures) -> Self {
        Self {
            name: name.into(),
            log,
            failures,
        }
    }
}

#[async_trait]
impl TradeAlgorithm for ScriptedTradeAlgorithm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(
        &mut self,
        context: &Arc<dyn TradeContext>,
        _notifier: &dyn Notifier,
    ) -> Result<()> {
        self.log.record(&self.name, "initialize", context.id().as_str());
        self.failures.check(&self.name, "initialize")
    }

    async fn update(&mut self, context: &Arc<dyn TradeContext>, notifier: &dyn Notifier) -> Result<()> {
        self.log.record(&self.name, "update", context.id().as_str());
        notifier.notify(Event::Alert(AlertEvent::new(
            Severity::Info,
            self.name.clone(),
            format!("updated {}", context.id()),
        )));
        self.failures.check(&self.name, "update")
    }

    async fn finalize(
        &mut self,
        context: &Arc<dyn TradeContext>,
        _notifier: &dyn Notifier,
    ) -> Result<()> {
        self.log.record(&self.name, "finalize", context.id().as_str());
        self.failures.check(&self.name, "finalize")
    }
}

/// Arbitrage algorithm that records its calls.
pub struct ScriptedArbitrageAlgorithm {
    name: String,
    log: CallLog,
    failures: Failures,
}

impl ScriptedArbitrageAlgorithm {
    pub fn new(name: impl Into<String>, log: CallLog, failures: Failures) -> Self {
        Self {
            name: name.into(),
            log,
            failures,
        }
    }
}

#[async_trait]
impl ArbitrageAlgorithm for ScriptedArbitrageAlgorithm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(&mut self, _venues: &VenueSet, _notifier: &dyn Notifier) -> Result<()> {
        self.log.record(&self.name, "initialize", "venues");
        self.failures.check(&self.name, "initialize")
    }

    async fn update(&mut self, _venues: &VenueSet, _notifier: &dyn Notifier) -> Result<()> {
        self.log.record(&self.name, "update", "venues");
        self.failures.check(&self.name, "update")
    }

    async fn finalize(&mut self, _venues: &VenueSet, _notifier: &dyn Notifier) -> Result<()> {
        self.log.record(&self.name, "finalize", "venues");
        self.failures.check(&self.name, "finalize")
    }
}
