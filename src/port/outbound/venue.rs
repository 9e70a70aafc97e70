//! Venue port for streaming market data.
//!
//! A venue connector owns its protocol client and its trade contexts. The
//! orchestrator only ever asks it to walk its contexts and to open or close
//! the stream for one context at a time.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::TradeContext;
use crate::error::Result;
use crate::port::inbound::streaming::StreamingHandler;

/// A finite walk over a venue's trade contexts.
///
/// Every call to [`Venue::trade_contexts`] must return a fresh cursor that
/// starts from the first context.
pub type TradeContextCursor<'a> = Box<dyn Iterator<Item = Arc<dyn TradeContext>> + Send + 'a>;

/// Connector to one external trading venue.
#[async_trait]
pub trait Venue: Send + Sync {
    /// Registry name of the venue.
    fn name(&self) -> &str;

    /// Hand the connector the callback it invokes whenever new data for a
    /// context arrives. Called once, right after construction.
    fn initialize(&self, handler: Arc<dyn StreamingHandler>);

    /// Walk all tradable contexts from the start.
    fn trade_contexts(&self) -> TradeContextCursor<'_>;

    /// Open the live feed for one context.
    async fn start_streaming(&self, context: &Arc<dyn TradeContext>) -> Result<()>;

    /// Close the live feed for one context.
    async fn stop_streaming(&self, context: &Arc<dyn TradeContext>) -> Result<()>;
}

/// The live set of connected venues, keyed by name.
///
/// Built once during initialization and never mutated afterwards, so it is
/// shared freely behind an `Arc`. Use [`names`](Self::names) for a stable
/// order.
#[derive(Clone, Default)]
pub struct VenueSet {
    venues: HashMap<String, Arc<dyn Venue>>,
}

impl VenueSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a venue under its registry name, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, venue: Arc<dyn Venue>) {
        self.venues.insert(name.into(), venue);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Venue>> {
        self.venues.get(name)
    }

    /// Venue names, sorted for stable display.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.venues.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

impl fmt::Debug for VenueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VenueSet")
            .field("venues", &self.names())
            .finish()
    }
}
