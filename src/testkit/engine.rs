//! Counting decision engines for testing.
//!
//! Both engines record every call so tests can assert the create/destroy
//! balance the orchestrator guarantees, and both can be told to fail.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{TradeContext, TradeId};
use crate::error::{Error, Result};
use crate::port::{ArbitrageEngine, TradeEngine, VenueSet};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VenueCounts {
    pub creates: usize,
    pub updates: usize,
    pub destroys: usize,
}

/// Trade engine that counts calls per venue and tracks live ids.
#[derive(Default)]
pub struct CountingTradeEngine {
    counts: Mutex<HashMap<String, VenueCounts>>,
    live: Mutex<HashSet<TradeId>>,
    fail_create: Mutex<HashSet<TradeId>>,
    fail_update: AtomicBool,
}

impl CountingTradeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create` fail for `id`.
    pub fn fail_create_on(self, id: impl Into<TradeId>) -> Self {
        self.fail_create.lock().insert(id.into());
        self
    }

    /// Make every `update` fail.
    pub fn fail_updates(self) -> Self {
        self.fail_update.store(true, Ordering::SeqCst);
        self
    }

    pub fn counts(&self, venue: &str) -> VenueCounts {
        self.counts.lock().get(venue).copied().unwrap_or_default()
    }

    pub fn total_creates(&self) -> usize {
        self.counts.lock().values().map(|c| c.creates).sum()
    }

    pub fn total_updates(&self) -> usize {
        self.counts.lock().values().map(|c| c.updates).sum()
    }

    pub fn total_destroys(&self) -> usize {
        self.counts.lock().values().map(|c| c.destroys).sum()
    }

    /// Ids created and not yet destroyed.
    pub fn live(&self) -> usize {
        self.live.lock().len()
    }

    fn bump(&self, context: &Arc<dyn TradeContext>, f: impl FnOnce(&mut VenueCounts)) {
        let mut counts = self.counts.lock();
        f(counts.entry(context.venue().to_string()).or_default());
    }
}

#[async_trait]
impl TradeEngine for CountingTradeEngine {
    async fn create(&self, id: &TradeId, context: &Arc<dyn TradeContext>) -> Result<()> {
        if self.fail_create.lock().contains(id) {
            return Err(Error::Venue(format!("scripted create failure for {id}")));
        }
        if !self.live.lock().insert(id.clone()) {
            return Err(Error::EngineExists(id.to_string()));
        }
        self.bump(context, |c| c.creates += 1);
        Ok(())
    }

    async fn update(&self, id: &TradeId, context: &Arc<dyn TradeContext>) -> Result<()> {
        self.bump(context, |c| c.updates += 1);
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Error::Venue(format!("scripted update failure for {id}")));
        }
        if !self.live.lock().contains(id) {
            return Err(Error::EngineNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn destroy(&self, id: &TradeId, context: &Arc<dyn TradeContext>) -> Result<()> {
        self.live.lock().remove(id);
        self.bump(context, |c| c.destroys += 1);
        Ok(())
    }
}

/// Arbitrage engine that counts calls.
#[derive(Default)]
pub struct CountingArbitrageEngine {
    creates: AtomicUsize,
    updates: AtomicUsize,
    destroys: AtomicUsize,
    fail_create: AtomicBool,
    fail_update: AtomicBool,
    fail_destroy: AtomicBool,
}

impl CountingArbitrageEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_create(self) -> Self {
        self.fail_create.store(true, Ordering::SeqCst);
        self
    }

    pub fn fail_updates(self) -> Self {
        self.fail_update.store(true, Ordering::SeqCst);
        self
    }

    pub fn fail_destroy(self) -> Self {
        self.fail_destroy.store(true, Ordering::SeqCst);
        self
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    /// Number of `update` calls, failed ones included.
    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn destroys(&self) -> usize {
        self.destroys.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArbitrageEngine for CountingArbitrageEngine {
    async fn create(&self, _venues: &VenueSet) -> Result<()> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Error::Venue("scripted arbitrage create failure".into()));
        }
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update(&self, _venues: &VenueSet) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Error::Venue("scripted arbitrage update failure".into()));
        }
        Ok(())
    }

    async fn destroy(&self, _venues: &VenueSet) -> Result<()> {
        self.destroys.fetch_add(1, Ordering::SeqCst);
        if self.fail_destroy.load(Ordering::SeqCst) {
            return Err(Error::Venue("scripted arbitrage destroy failure".into()));
        }
        Ok(())
    }
}
