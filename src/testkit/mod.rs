//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`venue`]: `ScriptedVenue` connector and `StaticContext` contexts.
//! - [`engine`]: `CountingTradeEngine` / `CountingArbitrageEngine`.
//! - [`algorithm`]: scripted algorithms that log every call.
//! - [`notifier`]: `RecordingNotifier`.

pub mod algorithm;
pub mod engine;
pub mod notifier;
pub mod venue;
