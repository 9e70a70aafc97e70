//! Session orchestration.
//!
//! Lifecycle sequencing for a trading session: streaming across venues, the
//! periodic arbitrage loop, and the orchestrator tying them to the
//! control-plane server.

pub mod arbitrage;
pub mod builder;
pub mod dispatch;
pub mod orchestrator;
pub mod streaming;

pub use arbitrage::{ArbitrageLoop, LoopState};
pub use builder::OrchestratorBuilder;
pub use dispatch::StreamingDispatcher;
pub use orchestrator::Orchestrator;
pub use streaming::StreamingManager;
