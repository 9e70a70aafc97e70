//! Session orchestrator.
//!
//! Sequences the control-plane server, the venue registry, streaming and the
//! arbitrage loop:
//!
//! ```text
//! initialize: server.start ──▶ venues.connect            (Idle ──▶ Initialized)
//! start:      start_streaming ──▶ arbitrage.start        (──▶ Running)
//! stop:       arbitrage.stop ──▶ stop_streaming          (──▶ Stopping)
//! finalize:   [stop if running] ──▶ server.stop (drain)  (──▶ Finalized)
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::arbitrage::ArbitrageLoop;
use super::dispatch::StreamingDispatcher;
use super::streaming::StreamingManager;
use crate::adapter::inbound::control::ControlPlaneServer;
use crate::application::state::RuntimeStatus;
use crate::domain::Phase;
use crate::error::{Error, Result, TeardownReport};
use crate::infrastructure::config::venue::VenuesConfig;
use crate::infrastructure::venue::{VenueCatalog, VenueRegistry};
use crate::port::{ArbitrageEngine, Event, Notifier, StreamingHandler, TradeEngine, VenueSet};

/// Composition root of a trading session.
///
/// Built with [`OrchestratorBuilder`](super::builder::OrchestratorBuilder).
/// An orchestrator runs exactly one session; it cannot be reused once
/// finalized.
pub struct Orchestrator {
    pub(super) venues_config: VenuesConfig,
    pub(super) catalog: VenueCatalog,
    pub(super) arbitrage_interval: Duration,
    pub(super) trade_engine: Arc<dyn TradeEngine>,
    pub(super) arbitrage_engine: Arc<dyn ArbitrageEngine>,
    pub(super) notifier: Arc<dyn Notifier>,
    pub(super) status: Arc<RuntimeStatus>,
    pub(super) server: ControlPlaneServer,
    pub(super) streaming: StreamingManager,
    pub(super) venues: Arc<VenueSet>,
    pub(super) arbitrage: Option<ArbitrageLoop>,
    pub(super) phase: Phase,
}

impl Orchestrator {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The connected venues. Empty before `initialize`.
    #[must_use]
    pub fn venues(&self) -> &Arc<VenueSet> {
        &self.venues
    }

    /// Shared status read by the control-plane handler.
    #[must_use]
    pub fn status(&self) -> Arc<RuntimeStatus> {
        Arc::clone(&self.status)
    }

    /// Bound control-plane address while the server is running.
    #[must_use]
    pub fn control_plane_addr(&self) -> Option<SocketAddr> {
        self.server.local_addr()
    }

    /// Number of contexts with an open stream.
    #[must_use]
    pub fn open_streams(&self) -> usize {
        self.streaming.open_streams()
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.status.set_phase(phase);
    }

    fn require(&self, operation: &'static str, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Error::Lifecycle {
                operation,
                phase: self.phase,
            })
        }
    }

    /// Start the control-plane server, then connect every configured venue.
    ///
    /// # Errors
    ///
    /// - [`Error::Lifecycle`] unless the orchestrator is idle
    /// - [`Error::ControlPlane`] if the server cannot start
    /// - [`Error::VenueCreate`] if a venue cannot be built; the server is
    ///   stopped again before returning
    pub async fn initialize(&mut self) -> Result<()> {
        self.require("initialize", Phase::Idle)?;

        self.server.start().await?;

        let handler: Arc<dyn StreamingHandler> =
            Arc::new(StreamingDispatcher::new(Arc::clone(&self.trade_engine)));
        let venues = match VenueRegistry::connect(&self.catalog, &self.venues_config, &handler) {
            Ok(venues) => venues,
            Err(e) => {
                error!(error = %e, "Venue initialization failed");
                self.server.stop().await;
                return Err(e);
            }
        };

        for name in venues.names() {
            self.notifier.notify(Event::VenueConnected {
                venue: name.to_string(),
            });
        }
        if venues.is_empty() {
            warn!("No venues configured");
        }

        self.status.set_venues(venues.len());
        self.venues = Arc::new(venues);
        self.set_phase(Phase::Initialized);
        info!(venues = self.venues.len(), "Orchestrator initialized");
        Ok(())
    }

    /// Open streaming on every venue, then launch the arbitrage loop.
    ///
    /// # Errors
    ///
    /// - [`Error::Lifecycle`] unless initialized
    /// - [`Error::Streaming`] if streaming fails; it has been rolled back,
    ///   arbitrage is not started and the phase stays `Initialized`
    /// - [`Error::Arbitrage`] if the arbitrage engine cannot be created;
    ///   streaming keeps running, the phase is `Running` and the caller
    ///   decides whether to `stop`
    pub async fn start(&mut self) -> Result<()> {
        self.require("start", Phase::Initialized)?;

        if let Err(e) = self.streaming.start_streaming(&self.venues).await {
            self.notifier.notify(Event::StreamingFailed {
                reason: e.to_string(),
            });
            return Err(Error::Streaming(Box::new(e)));
        }
        let contexts = self.streaming.open_streams();
        self.status.set_streams(contexts);
        self.notifier.notify(Event::StreamingStarted {
            venues: self.venues.len(),
            contexts,
        });
        self.set_phase(Phase::Running);

        let arbitrage = ArbitrageLoop::new(
            Arc::clone(&self.arbitrage_engine),
            Arc::clone(&self.venues),
            self.arbitrage_interval,
        );
        let started = arbitrage.start().await;
        self.arbitrage = Some(arbitrage);

        match started {
            Ok(()) => {
                self.notifier.notify(Event::ArbitrageStarted {
                    venues: self.venues.len(),
                });
                info!(contexts, "Session running");
                Ok(())
            }
            Err(e) => {
                self.notifier.notify(Event::ArbitrageFailed {
                    reason: e.to_string(),
                });
                Err(Error::Arbitrage(Box::new(e)))
            }
        }
    }

    /// Cancel the arbitrage loop, then tear down streaming.
    ///
    /// Never fails: every teardown error is logged and returned in the
    /// report. Outside `Running` this logs and returns an empty report.
    pub async fn stop(&mut self) -> TeardownReport {
        let mut report = TeardownReport::new();
        if self.phase != Phase::Running {
            warn!(phase = %self.phase, "stop ignored");
            return report;
        }
        self.set_phase(Phase::Stopping);

        if let Some(arbitrage) = self.arbitrage.take() {
            report.merge(arbitrage.stop().await);
        }
        report.merge(self.streaming.stop_streaming().await);
        self.status.set_streams(self.streaming.open_streams());

        self.notifier.notify(Event::Stopped {
            errors: report.len(),
        });
        if report.is_clean() {
            info!("Session stopped");
        } else {
            warn!(errors = report.len(), "Session stopped with errors");
        }
        report
    }

    /// Shut the session down for good and wait for the control-plane server
    /// to drain.
    ///
    /// Unconditional: a session still `Running` is stopped first. Always
    /// leaves the orchestrator `Finalized`; a second call does nothing.
    pub async fn finalize(&mut self) {
        match self.phase {
            Phase::Finalized => {
                debug!("Already finalized");
                return;
            }
            Phase::Running => {
                warn!("finalize called while running, stopping first");
                self.stop().await;
            }
            _ => {}
        }

        self.server.stop().await;
        self.set_phase(Phase::Finalized);
        info!("Orchestrator finalized");
    }

    /// Run a whole session: initialize, start, wait for `shutdown`, stop and
    /// finalize.
    ///
    /// # Errors
    ///
    /// Returns the first `initialize` or `start` error. Whatever was started
    /// is torn down before returning.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<TeardownReport>
    where
        F: Future<Output = ()>,
    {
        self.initialize().await?;

        if let Err(e) = self.start().await {
            error!(error = %e, "Session failed to start");
            self.stop().await;
            self.finalize().await;
            return Err(e);
        }

        shutdown.await;
        info!("Shutdown requested");

        let report = self.stop().await;
        self.finalize().await;
        Ok(report)
    }
}
