//! Infrastructure configuration modules.

pub mod logging;
pub mod notifier;
pub mod robot;
pub mod section;
pub mod server;
pub mod settings;
pub mod venue;
