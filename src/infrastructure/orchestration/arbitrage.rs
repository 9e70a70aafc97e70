//! Periodic cross-venue arbitrage loop.
//!
//! ```text
//! NotStarted ──start──▶ Running ──stop──▶ Stopped
//!      └──────────────stop──────────────────▲
//! ```
//!
//! The loop task races each tick against a `watch` shutdown signal with a
//! `biased` select, so once `stop` has signalled no new tick begins. An
//! update already in flight is allowed to finish; `stop` awaits the task
//! before the engine is destroyed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, Error, Result, TeardownReport};
use crate::port::{ArbitrageEngine, VenueSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    NotStarted,
    Running,
    Stopped,
}

struct Inner {
    state: LoopState,
    handle: Option<JoinHandle<()>>,
}

/// One run of the arbitrage loop. Not restartable; build a new one per
/// session start.
pub struct ArbitrageLoop {
    engine: Arc<dyn ArbitrageEngine>,
    venues: Arc<VenueSet>,
    period: Duration,
    shutdown: watch::Sender<bool>,
    inner: Mutex<Inner>,
}

impl ArbitrageLoop {
    pub fn new(engine: Arc<dyn ArbitrageEngine>, venues: Arc<VenueSet>, period: Duration) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            engine,
            venues,
            period,
            shutdown,
            inner: Mutex::new(Inner {
                state: LoopState::NotStarted,
                handle: None,
            }),
        }
    }

    pub async fn state(&self) -> LoopState {
        self.inner.lock().await.state
    }

    /// Create the arbitrage engine and spawn the periodic task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArbitrageCreate`] if the engine cannot be created;
    /// the loop is not started in that case. Returns [`Error::EngineExists`]
    /// if this loop was already started, and [`ConfigError::InvalidValue`]
    /// for a zero period, before the engine is touched.
    pub async fn start(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.state != LoopState::NotStarted {
            return Err(Error::EngineExists("arbitrage loop".to_string()));
        }
        if self.period.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "arbitrage_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        self.engine
            .create(&self.venues)
            .await
            .map_err(|e| Error::ArbitrageCreate(Box::new(e)))?;

        let task = run_loop(
            Arc::clone(&self.engine),
            Arc::clone(&self.venues),
            self.period,
            self.shutdown.subscribe(),
        );
        inner.handle = Some(tokio::spawn(task));
        inner.state = LoopState::Running;

        info!(
            venues = self.venues.len(),
            period_ms = self.period.as_millis() as u64,
            "Arbitrage loop started"
        );
        Ok(())
    }

    /// Cancel the loop, wait for its task to exit, then destroy the engine.
    ///
    /// Idempotent. Destroy failures are logged and returned in the report.
    pub async fn stop(&self) -> TeardownReport {
        let mut report = TeardownReport::new();
        self.shutdown.send_replace(true);

        let mut inner = self.inner.lock().await;
        let was_running = inner.state == LoopState::Running;
        inner.state = LoopState::Stopped;

        let Some(handle) = inner.handle.take() else {
            return report;
        };
        if let Err(e) = handle.await {
            warn!(error = %e, "Arbitrage task ended abnormally");
        }

        if was_running {
            if let Err(e) = self.engine.destroy(&self.venues).await {
                warn!(error = %e, "Arbitrage engine destroy failed");
                report.push(Error::ArbitrageDestroy(Box::new(e)));
            }
        }

        info!("Arbitrage loop stopped");
        report
    }
}

async fn run_loop(
    engine: Arc<dyn ArbitrageEngine>,
    venues: Arc<VenueSet>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if *shutdown.borrow_and_update() {
            break;
        }
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                if let Err(e) = engine.update(&venues).await {
                    warn!(error = %e, "Arbitrage update failed");
                }
            }
        }
    }

    debug!("Arbitrage task exiting");
}
