//! Conductor - trading-session orchestrator.
//!
//! Manages streaming connections to multiple trading venues and a periodic
//! cross-venue arbitrage loop, coordinating them with pluggable decision
//! engines.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Trade contexts, identifiers and lifecycle phases
//! - [`port`] - Venue, decision-engine, algorithm and notifier traits
//! - [`application`] - The robot (algorithm host) and shared runtime status
//! - [`adapter`] - CLI, control-plane HTTP server and notifiers
//! - [`infrastructure`] - Configuration, venue registry and orchestration
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use conductor::application::robot::AlgorithmCatalog;
//! use conductor::infrastructure::bootstrap::build_orchestrator;
//! use conductor::infrastructure::config::settings::Config;
//! use conductor::infrastructure::venue::VenueCatalog;
//!
//! # async fn run() -> conductor::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let mut orchestrator =
//!     build_orchestrator(config, VenueCatalog::new(), &AlgorithmCatalog::new())?;
//! orchestrator.run_until(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
