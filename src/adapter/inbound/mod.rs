//! Inbound adapters (driving side).
//!
//! - [`cli`]: command-line entry points
//! - [`control`]: control-plane HTTP server

pub mod cli;
pub mod control;
