//! Shared runtime status.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Phase;

/// Lock-free snapshot of the session, shared between the orchestrator
/// (writer) and the control-plane handlers (readers).
#[derive(Debug)]
pub struct RuntimeStatus {
    phase: AtomicU8,
    venues: AtomicUsize,
    streams: AtomicUsize,
    started_at: DateTime<Utc>,
}

/// Serializable view of [`RuntimeStatus`].
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub status: &'static str,
    pub phase: Phase,
    pub venues: usize,
    pub streams: usize,
    pub uptime_seconds: u64,
}

impl RuntimeStatus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Idle.as_u8()),
            venues: AtomicUsize::new(0),
            streams: AtomicUsize::new(0),
            started_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn set_phase(&self, phase: Phase) {
        self.phase.store(phase.as_u8(), Ordering::Release);
    }

    #[must_use]
    pub fn venues(&self) -> usize {
        self.venues.load(Ordering::Relaxed)
    }

    pub fn set_venues(&self, count: usize) {
        self.venues.store(count, Ordering::Relaxed);
    }

    /// Number of contexts with an open stream.
    #[must_use]
    pub fn streams(&self) -> usize {
        self.streams.load(Ordering::Relaxed)
    }

    pub fn set_streams(&self, count: usize) {
        self.streams.store(count, Ordering::Relaxed);
    }

    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        let elapsed = Utc::now() - self.started_at;
        u64::try_from(elapsed.num_seconds()).unwrap_or(0)
    }

    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            status: "ok",
            phase: self.phase(),
            venues: self.venues(),
            streams: self.streams(),
            uptime_seconds: self.uptime_seconds(),
        }
    }
}

impl Default for RuntimeStatus {
    fn default() -> Self {
        Self::new()
    }
}
