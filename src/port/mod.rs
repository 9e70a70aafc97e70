//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────────────────┐
//!   Venue ───────▶│       Orchestrator       │──────▶ TradeEngine
//!  (outbound)     │                          │──────▶ ArbitrageEngine
//!       ▲         └──────────────────────────┘──────▶ Notifier
//!       │                      ▲
//!       └─ StreamingHandler ───┘ (inbound, called from venue tasks)
//! ```
//!
//! # Available Ports
//!
//! - [`Venue`], [`VenueSet`] - Venue connectors and the live set of them
//! - [`TradeEngine`], [`ArbitrageEngine`] - Decision engines
//! - [`Notifier`] - Event notifications
//! - [`StreamingHandler`] - Streaming update callback handed to venues
//! - [`TradeAlgorithm`], [`ArbitrageAlgorithm`] - Algorithms hosted by the robot

pub mod inbound;
pub mod outbound;

pub use inbound::algorithm::{ArbitrageAlgorithm, TradeAlgorithm};
pub use inbound::streaming::StreamingHandler;
pub use outbound::engine::{ArbitrageEngine, TradeEngine};
pub use outbound::notifier::{AlertEvent, Event, Notifier, Severity};
pub use outbound::venue::{TradeContextCursor, Venue, VenueSet};
