//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`streaming`]: the update callback venue connectors drive
//! - [`algorithm`]: pluggable algorithms driven by the robot

pub mod algorithm;
pub mod streaming;
