//! Name -> constructor tables for algorithms.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Result;
use crate::infrastructure::config::robot::AlgorithmConfig;
use crate::port::{ArbitrageAlgorithm, TradeAlgorithm};

/// Builds a fresh trade algorithm from its settings.
pub type TradeAlgorithmFactory =
    Arc<dyn Fn(AlgorithmConfig<'_>) -> Result<Box<dyn TradeAlgorithm>> + Send + Sync>;

/// Builds a fresh arbitrage algorithm from its settings.
pub type ArbitrageAlgorithmFactory =
    Arc<dyn Fn(AlgorithmConfig<'_>) -> Result<Box<dyn ArbitrageAlgorithm>> + Send + Sync>;

/// Every algorithm the binary knows how to build.
///
/// Configuration only selects from this table by name.
#[derive(Clone, Default)]
pub struct AlgorithmCatalog {
    trade: BTreeMap<String, TradeAlgorithmFactory>,
    arbitrage: BTreeMap<String, ArbitrageAlgorithmFactory>,
}

impl AlgorithmCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trade algorithm constructor under `name`.
    pub fn register_trade<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(AlgorithmConfig<'_>) -> Result<Box<dyn TradeAlgorithm>> + Send + Sync + 'static,
    {
        self.trade.insert(name.into(), Arc::new(factory));
        self
    }

    /// Register an arbitrage algorithm constructor under `name`.
    pub fn register_arbitrage<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(AlgorithmConfig<'_>) -> Result<Box<dyn ArbitrageAlgorithm>> + Send + Sync + 'static,
    {
        self.arbitrage.insert(name.into(), Arc::new(factory));
        self
    }

    #[must_use]
    pub fn trade(&self, name: &str) -> Option<&TradeAlgorithmFactory> {
        self.trade.get(name)
    }

    #[must_use]
    pub fn arbitrage(&self, name: &str) -> Option<&ArbitrageAlgorithmFactory> {
        self.arbitrage.get(name)
    }
}
