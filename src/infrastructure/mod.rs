//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration, venue wiring and session orchestration.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`orchestration`] - Session lifecycle
//! - [`venue`] - Venue catalog and registry

pub mod bootstrap;
pub mod config;
pub mod orchestration;
pub mod venue;
