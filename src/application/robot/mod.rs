//! Robot: the default decision engine.
//!
//! The robot hosts named algorithms chosen by configuration and implements
//! both decision-engine ports on top of them:
//!
//! - [`TradeEngine`]: one set of trade algorithms per [`TradeId`], created
//!   before a context starts streaming and finalized after it stops.
//! - [`ArbitrageEngine`]: one set of arbitrage algorithms for the session.
//!
//! ```text
//! create(id)  ──▶ build + initialize every algorithm ──▶ instances[id]
//! update(id)  ──▶ instances[id].update (all algorithms, errors collected)
//! destroy(id) ──▶ take instances[id] ──▶ finalize every algorithm
//! ```

mod catalog;

#[cfg(test)]
mod tests;

pub use catalog::{AlgorithmCatalog, ArbitrageAlgorithmFactory, TradeAlgorithmFactory};

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{TradeContext, TradeId};
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::robot::RobotConfig;
use crate::port::{
    ArbitrageAlgorithm, ArbitrageEngine, Notifier, TradeAlgorithm, TradeEngine, VenueSet,
};

const ARBITRAGE_KEY: &str = "arbitrage";

type TradeSet = Vec<Box<dyn TradeAlgorithm>>;
type ArbitrageSet = Vec<Box<dyn ArbitrageAlgorithm>>;

/// Algorithms for one context. `None` once destroyed, so an update racing a
/// destroy never reaches a finalized algorithm.
type TradeSlot = Arc<Mutex<Option<TradeSet>>>;

/// Decision engine hosting configured algorithms.
pub struct Robot {
    config: RobotConfig,
    trade_factories: Vec<(String, TradeAlgorithmFactory)>,
    arbitrage_factories: Vec<(String, ArbitrageAlgorithmFactory)>,
    instances: DashMap<TradeId, TradeSlot>,
    arbitrage: Mutex<Option<ArbitrageSet>>,
    notifier: Arc<dyn Notifier>,
}

impl Robot {
    /// Resolve the configured algorithm names against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAlgorithm`] for a name the catalog does
    /// not know.
    pub fn from_config(
        config: &RobotConfig,
        catalog: &AlgorithmCatalog,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let trade_factories = config
            .trade_algorithms
            .iter()
            .map(|name| {
                catalog
                    .trade(name)
                    .map(|factory| (name.clone(), Arc::clone(factory)))
                    .ok_or_else(|| ConfigError::UnknownAlgorithm {
                        kind: "trade",
                        name: name.clone(),
                    })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let arbitrage_factories = config
            .arbitrage_algorithms
            .iter()
            .map(|name| {
                catalog
                    .arbitrage(name)
                    .map(|factory| (name.clone(), Arc::clone(factory)))
                    .ok_or_else(|| ConfigError::UnknownAlgorithm {
                        kind: "arbitrage",
                        name: name.clone(),
                    })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!(
            trade = ?config.trade_algorithms,
            arbitrage = ?config.arbitrage_algorithms,
            "Robot configured"
        );

        Ok(Self {
            config: config.clone(),
            trade_factories,
            arbitrage_factories,
            instances: DashMap::new(),
            arbitrage: Mutex::new(None),
            notifier,
        })
    }

    /// Number of contexts with live algorithm state.
    #[must_use]
    pub fn active_contexts(&self) -> usize {
        self.instances.len()
    }

    /// Whether the arbitrage algorithms are currently alive.
    pub async fn arbitrage_active(&self) -> bool {
        self.arbitrage.lock().await.is_some()
    }

    /// Build and initialize one instance of every trade algorithm.
    ///
    /// On failure the algorithms already initialized are finalized again.
    async fn build_trade_set(&self, context: &Arc<dyn TradeContext>) -> Result<TradeSet> {
        let notifier = self.notifier.as_ref();
        let mut set: TradeSet = Vec::with_capacity(self.trade_factories.len());

        for (name, factory) in &self.trade_factories {
            let outcome = async {
                let mut algorithm = factory(self.config.algorithm_settings(name))?;
                algorithm.initialize(context, notifier).await?;
                Ok::<_, Error>(algorithm)
            }
            .await;

            match outcome {
                Ok(algorithm) => set.push(algorithm),
                Err(e) => {
                    finalize_trade_set(&mut set, context, notifier).await;
                    return Err(algorithm_error(name, &e));
                }
            }
        }
        Ok(set)
    }

    async fn build_arbitrage_set(&self, venues: &VenueSet) -> Result<ArbitrageSet> {
        let notifier = self.notifier.as_ref();
        let mut set: ArbitrageSet = Vec::with_capacity(self.arbitrage_factories.len());

        for (name, factory) in &self.arbitrage_factories {
            let outcome = async {
                let mut algorithm = factory(self.config.algorithm_settings(name))?;
                algorithm.initialize(venues, notifier).await?;
                Ok::<_, Error>(algorithm)
            }
            .await;

            match outcome {
                Ok(algorithm) => set.push(algorithm),
                Err(e) => {
                    finalize_arbitrage_set(&mut set, venues, notifier).await;
                    return Err(algorithm_error(name, &e));
                }
            }
        }
        Ok(set)
    }
}

fn algorithm_error(name: &str, error: &Error) -> Error {
    Error::Algorithm {
        name: name.to_string(),
        reason: error.to_string(),
    }
}

/// Finalize in reverse initialization order. Returns the first failure.
async fn finalize_trade_set(
    set: &mut TradeSet,
    context: &Arc<dyn TradeContext>,
    notifier: &dyn Notifier,
) -> Option<Error> {
    let mut first = None;
    while let Some(mut algorithm) = set.pop() {
        if let Err(e) = algorithm.finalize(context, notifier).await {
            warn!(
                algorithm = algorithm.name(),
                context = %context.id(),
                error = %e,
                "Trade algorithm finalize failed"
            );
            first.get_or_insert_with(|| algorithm_error(algorithm.name(), &e));
        }
    }
    first
}

async fn finalize_arbitrage_set(
    set: &mut ArbitrageSet,
    venues: &VenueSet,
    notifier: &dyn Notifier,
) -> Option<Error> {
    let mut first = None;
    while let Some(mut algorithm) = set.pop() {
        if let Err(e) = algorithm.finalize(venues, notifier).await {
            warn!(
                algorithm = algorithm.name(),
                error = %e,
                "Arbitrage algorithm finalize failed"
            );
            first.get_or_insert_with(|| algorithm_error(algorithm.name(), &e));
        }
    }
    first
}

#[async_trait]
impl TradeEngine for Robot {
    async fn create(&self, id: &TradeId, context: &Arc<dyn TradeContext>) -> Result<()> {
        if self.instances.contains_key(id) {
            return Err(Error::EngineExists(id.to_string()));
        }

        let set = self.build_trade_set(context).await?;

        let rejected = match self.instances.entry(id.clone()) {
            Entry::Occupied(_) => Some(set),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(Some(set))));
                None
            }
        };
        if let Some(mut set) = rejected {
            finalize_trade_set(&mut set, context, self.notifier.as_ref()).await;
            return Err(Error::EngineExists(id.to_string()));
        }

        debug!(context = %id, algorithms = self.trade_factories.len(), "Trade engine created");
        Ok(())
    }

    async fn update(&self, id: &TradeId, context: &Arc<dyn TradeContext>) -> Result<()> {
        let Some(slot) = self.instances.get(id).map(|entry| Arc::clone(entry.value())) else {
            return Err(Error::EngineNotFound(id.to_string()));
        };

        let mut guard = slot.lock().await;
        let Some(set) = guard.as_mut() else {
            return Err(Error::EngineNotFound(id.to_string()));
        };

        let notifier = self.notifier.as_ref();
        let mut first = None;
        for algorithm in set.iter_mut() {
            if let Err(e) = algorithm.update(context, notifier).await {
                first.get_or_insert_with(|| algorithm_error(algorithm.name(), &e));
            }
        }
        first.map_or(Ok(()), Err)
    }

    async fn destroy(&self, id: &TradeId, context: &Arc<dyn TradeContext>) -> Result<()> {
        let Some((_, slot)) = self.instances.remove(id) else {
            debug!(context = %id, "No trade engine to destroy");
            return Ok(());
        };

        let Some(mut set) = slot.lock().await.take() else {
            return Ok(());
        };
        let failed = finalize_trade_set(&mut set, context, self.notifier.as_ref()).await;

        debug!(context = %id, "Trade engine destroyed");
        failed.map_or(Ok(()), Err)
    }
}

#[async_trait]
impl ArbitrageEngine for Robot {
    async fn create(&self, venues: &VenueSet) -> Result<()> {
        let mut guard = self.arbitrage.lock().await;
        if guard.is_some() {
            return Err(Error::EngineExists(ARBITRAGE_KEY.to_string()));
        }

        *guard = Some(self.build_arbitrage_set(venues).await?);
        debug!(
            venues = venues.len(),
            algorithms = self.arbitrage_factories.len(),
            "Arbitrage engine created"
        );
        Ok(())
    }

    async fn update(&self, venues: &VenueSet) -> Result<()> {
        let mut guard = self.arbitrage.lock().await;
        let Some(set) = guard.as_mut() else {
            return Err(Error::EngineNotFound(ARBITRAGE_KEY.to_string()));
        };

        let notifier = self.notifier.as_ref();
        let mut first = None;
        for algorithm in set.iter_mut() {
            if let Err(e) = algorithm.update(venues, notifier).await {
                first.get_or_insert_with(|| algorithm_error(algorithm.name(), &e));
            }
        }
        first.map_or(Ok(()), Err)
    }

    async fn destroy(&self, venues: &VenueSet) -> Result<()> {
        let Some(mut set) = self.arbitrage.lock().await.take() else {
            debug!("No arbitrage engine to destroy");
            return Ok(());
        };

        let failed = finalize_arbitrage_set(&mut set, venues, self.notifier.as_ref()).await;
        debug!("Arbitrage engine destroyed");
        failed.map_or(Ok(()), Err)
    }
}
