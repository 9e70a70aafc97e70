//! Streaming lifecycle.
//!
//! Opens the live feed for every trade context of every venue, creating the
//! per-context trade engine first, and unwinds exactly what was opened when
//! anything fails.
//!
//! ```text
//! start:  for venue, for context:  engine.create ──▶ venue.start_streaming
//! stop:   for tracked pair:        venue.stop_streaming ──▶ engine.destroy
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::{TradeContext, TradeId};
use crate::error::{Error, Result, TeardownReport};
use crate::port::{TradeEngine, Venue, VenueSet};

/// A (venue, context) pair whose trade engine was created.
struct ActiveContext {
    venue_name: String,
    venue: Arc<dyn Venue>,
    context: Arc<dyn TradeContext>,
    id: TradeId,
    /// Whether `start_streaming` succeeded for this pair.
    streaming: bool,
}

/// Starts and stops streaming across a [`VenueSet`].
pub struct StreamingManager {
    engine: Arc<dyn TradeEngine>,
    active: Mutex<Vec<ActiveContext>>,
}

impl StreamingManager {
    pub fn new(engine: Arc<dyn TradeEngine>) -> Self {
        Self {
            engine,
            active: Mutex::new(Vec::new()),
        }
    }

    /// Number of contexts with an open stream.
    #[must_use]
    pub fn open_streams(&self) -> usize {
        self.active.lock().iter().filter(|a| a.streaming).count()
    }

    /// Number of contexts with a live trade engine.
    #[must_use]
    pub fn active_engines(&self) -> usize {
        self.active.lock().len()
    }

    /// Create an engine and open the stream for every context of every venue.
    ///
    /// Venues and contexts are processed sequentially. On the first failure
    /// everything opened so far is torn down and no further venue is tried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EngineCreate`] or [`Error::StreamStart`] naming the
    /// venue and context that failed.
    pub async fn start_streaming(&self, venues: &VenueSet) -> Result<()> {
        for name in venues.names() {
            let Some(venue) = venues.get(name) else {
                continue;
            };
            if let Err(e) = self.start_venue(name, venue).await {
                warn!(venue = %name, error = %e, "Streaming failed, rolling back");
                let report = self.stop_streaming().await;
                if !report.is_clean() {
                    warn!(errors = report.len(), "Rollback finished with errors");
                }
                return Err(e);
            }
        }

        info!(
            venues = venues.len(),
            contexts = self.open_streams(),
            "Streaming started"
        );
        Ok(())
    }

    async fn start_venue(&self, name: &str, venue: &Arc<dyn Venue>) -> Result<()> {
        let mut started = 0usize;

        for context in venue.trade_contexts() {
            let id = context.id();

            self.engine
                .create(&id, &context)
                .await
                .map_err(|e| Error::EngineCreate {
                    venue: name.to_string(),
                    context: id.clone(),
                    source: Box::new(e),
                })?;
            self.active.lock().push(ActiveContext {
                venue_name: name.to_string(),
                venue: Arc::clone(venue),
                context: Arc::clone(&context),
                id: id.clone(),
                streaming: false,
            });

            venue
                .start_streaming(&context)
                .await
                .map_err(|e| Error::StreamStart {
                    venue: name.to_string(),
                    context: id.clone(),
                    source: Box::new(e),
                })?;
            self.mark_streaming(&id);
            started += 1;
        }

        debug!(venue = %name, contexts = started, "Venue streaming");
        Ok(())
    }

    fn mark_streaming(&self, id: &TradeId) {
        if let Some(active) = self.active.lock().iter_mut().rev().find(|a| &a.id == id) {
            active.streaming = true;
        }
    }

    /// Stop every open stream, then destroy every created engine.
    ///
    /// Best-effort: each failure is logged and collected, and teardown still
    /// reaches every tracked context. A no-op when nothing was started.
    pub async fn stop_streaming(&self) -> TeardownReport {
        let active = std::mem::take(&mut *self.active.lock());
        let mut report = TeardownReport::new();
        if active.is_empty() {
            return report;
        }

        let total = active.len();
        for pair in active {
            if pair.streaming {
                if let Err(e) = pair.venue.stop_streaming(&pair.context).await {
                    warn!(
                        venue = %pair.venue_name,
                        context = %pair.id,
                        error = %e,
                        "Stop streaming failed"
                    );
                    report.push(Error::StreamStop {
                        venue: pair.venue_name.clone(),
                        context: pair.id.clone(),
                        source: Box::new(e),
                    });
                }
            }

            if let Err(e) = self.engine.destroy(&pair.id, &pair.context).await {
                warn!(
                    venue = %pair.venue_name,
                    context = %pair.id,
                    error = %e,
                    "Trade engine destroy failed"
                );
                report.push(Error::EngineDestroy {
                    venue: pair.venue_name,
                    context: pair.id,
                    source: Box::new(e),
                });
            }
        }

        info!(contexts = total, errors = report.len(), "Streaming stopped");
        report
    }
}
