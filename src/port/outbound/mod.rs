//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the collaborators the orchestrator drives:
//! venue connectors, decision engines and notifications.

pub mod engine;
pub mod notifier;
pub mod venue;
