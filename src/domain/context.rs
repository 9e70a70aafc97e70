//! Trade context abstraction.

use std::any::Any;
use std::fmt;

use super::id::TradeId;

/// One tradable instrument on a venue.
///
/// Contexts are owned by their venue connector; the orchestrator and the
/// decision engines only ever hold shared, read-only references. Engines
/// that need venue-specific data can downcast through [`as_any`].
///
/// [`as_any`]: TradeContext::as_any
pub trait TradeContext: Send + Sync + fmt::Debug {
    /// Stable identifier, used as the key for decision-engine state.
    fn id(&self) -> TradeId;

    /// Name of the venue this context belongs to.
    fn venue(&self) -> &str;

    /// Venue-specific view of this context.
    fn as_any(&self) -> &dyn Any;
}
