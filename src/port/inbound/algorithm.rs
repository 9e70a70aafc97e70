//! Algorithm ports hosted by the robot.
//!
//! The robot is the default decision engine: it owns one instance of every
//! configured trade algorithm per trade context, plus one instance of every
//! configured arbitrage algorithm for the whole session, and drives them
//! through `initialize -> update* -> finalize`.
//!
//! # Example
//!
//! ```ignore
//! use conductor::port::{Notifier, TradeAlgorithm};
//!
//! struct Spread { last: Option<String> }
//!
//! #[async_trait::async_trait]
//! impl TradeAlgorithm for Spread {
//!     fn name(&self) -> &str { "spread" }
//!     async fn initialize(&mut self, ctx: &Arc<dyn TradeContext>, _: &dyn Notifier) -> Result<()> { Ok(()) }
//!     async fn update(&mut self, ctx: &Arc<dyn TradeContext>, _: &dyn Notifier) -> Result<()> { Ok(()) }
//!     async fn finalize(&mut self, ctx: &Arc<dyn TradeContext>, _: &dyn Notifier) -> Result<()> { Ok(()) }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::TradeContext;
use crate::error::Result;
use crate::port::outbound::notifier::Notifier;
use crate::port::outbound::venue::VenueSet;

/// Algorithm bound to a single trade context.
#[async_trait]
pub trait TradeAlgorithm: Send + Sync {
    fn name(&self) -> &str;

    async fn initialize(
        &mut self,
        context: &Arc<dyn TradeContext>,
        notifier: &dyn Notifier,
    ) -> Result<()>;

    async fn update(&mut self, context: &Arc<dyn TradeContext>, notifier: &dyn Notifier)
        -> Result<()>;

    async fn finalize(
        &mut self,
        context: &Arc<dyn TradeContext>,
        notifier: &dyn Notifier,
    ) -> Result<()>;
}

/// Algorithm spanning every connected venue.
#[async_trait]
pub trait ArbitrageAlgorithm: Send + Sync {
    fn name(&self) -> &str;

    async fn initialize(&mut self, venues: &VenueSet, notifier: &dyn Notifier) -> Result<()>;

    async fn update(&mut self, venues: &VenueSet, notifier: &dyn Notifier) -> Result<()>;

    async fn finalize(&mut self, venues: &VenueSet, notifier: &dyn Notifier) -> Result<()>;
}
