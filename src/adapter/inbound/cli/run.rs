//! Handler for the `run` command.

use anyhow::Context;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::application::robot::AlgorithmCatalog;
use crate::infrastructure::bootstrap::build_orchestrator;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::venue::VenueCatalog;

/// Execute the run command with no venue connectors or algorithms linked in.
pub async fn execute(args: &RunArgs) -> anyhow::Result<()> {
    execute_with(args, VenueCatalog::new(), &AlgorithmCatalog::new()).await
}

/// Execute the run command with the caller's connectors and algorithms.
///
/// Runs until Ctrl-C, then stops and finalizes the session.
pub async fn execute_with(
    args: &RunArgs,
    venues: VenueCatalog,
    algorithms: &AlgorithmCatalog,
) -> anyhow::Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "conductor starting");

    let mut orchestrator = build_orchestrator(config, venues, algorithms)
        .context("failed to wire session")?;
    let report = orchestrator
        .run_until(shutdown_signal())
        .await
        .context("session failed")?;

    if report.is_clean() {
        info!("conductor stopped");
    } else {
        warn!(errors = report.len(), "conductor stopped with teardown errors");
    }
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Cannot listen for Ctrl-C, shutting down"),
    }
}
