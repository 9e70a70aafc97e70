//! Venue-agnostic domain types.
//!
//! Nothing in here knows about connectors, engines or the runtime; these are
//! the values passed between them.

pub mod context;
pub mod id;
pub mod lifecycle;

pub use context::TradeContext;
pub use id::TradeId;
pub use lifecycle::Phase;
