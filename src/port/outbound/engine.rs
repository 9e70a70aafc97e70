//! Decision-engine ports.
//!
//! The orchestrator never looks inside an engine. It only sequences the
//! create/update/destroy calls around streaming and the arbitrage loop.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{TradeContext, TradeId};
use crate::error::Result;

use super::venue::VenueSet;

/// Per-context decision engine, addressed by trade identifier.
///
/// Implementations must keep at most one instance per identifier and must
/// tolerate `destroy` for an identifier that was never created.
#[async_trait]
pub trait TradeEngine: Send + Sync {
    /// Create the engine state for a context before its stream opens.
    async fn create(&self, id: &TradeId, context: &Arc<dyn TradeContext>) -> Result<()>;

    /// Feed a streaming update to the engine state for a context.
    async fn update(&self, id: &TradeId, context: &Arc<dyn TradeContext>) -> Result<()>;

    /// Tear down the engine state for a context after its stream closed.
    async fn destroy(&self, id: &TradeId, context: &Arc<dyn TradeContext>) -> Result<()>;
}

/// Cross-venue decision engine, one per process.
#[async_trait]
pub trait ArbitrageEngine: Send + Sync {
    async fn create(&self, venues: &VenueSet) -> Result<()>;

    /// Re-evaluate the whole venue set. Called on every arbitrage tick.
    async fn update(&self, venues: &VenueSet) -> Result<()>;

    async fn destroy(&self, venues: &VenueSet) -> Result<()>;
}
