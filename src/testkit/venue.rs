//! Scripted venue connector for testing.
//!
//! [`ScriptedVenue`] yields a fixed list of [`StaticContext`]s, counts every
//! stream open/close, and can be told to fail for chosen contexts.

use std::any::Any;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{TradeContext, TradeId};
use crate::error::{Error, Result};
use crate::port::{StreamingHandler, TradeContextCursor, Venue};

/// Minimal trade context carrying only an id and its venue.
#[derive(Debug, Clone)]
pub struct StaticContext {
    id: TradeId,
    venue: String,
}

impl StaticContext {
    pub fn new(venue: impl Into<String>, id: impl Into<TradeId>) -> Self {
        Self {
            id: id.into(),
            venue: venue.into(),
        }
    }

    /// Same as [`StaticContext::new`], already behind the trait object.
    pub fn shared(venue: impl Into<String>, id: impl Into<TradeId>) -> Arc<dyn TradeContext> {
        Arc::new(Self::new(venue, id))
    }
}

impl TradeContext for StaticContext {
    fn id(&self) -> TradeId {
        self.id.clone()
    }

    fn venue(&self) -> &str {
        &self.venue
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A venue with scripted contexts and failure injection.
pub struct ScriptedVenue {
    name: String,
    contexts: Vec<Arc<dyn TradeContext>>,
    handler: Mutex<Option<Arc<dyn StreamingHandler>>>,
    fail_start: HashSet<TradeId>,
    fail_stop: HashSet<TradeId>,
    open: Mutex<HashSet<TradeId>>,
    start_count: AtomicUsize,
    stop_count: AtomicUsize,
}

impl ScriptedVenue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contexts: Vec::new(),
            handler: Mutex::new(None),
            fail_start: HashSet::new(),
            fail_stop: HashSet::new(),
            open: Mutex::new(HashSet::new()),
            start_count: AtomicUsize::new(0),
            stop_count: AtomicUsize::new(0),
        }
    }

    /// Add `count` contexts named `<venue>_<index>`.
    pub fn with_contexts(mut self, count: usize) -> Self {
        for index in 0..count {
            let id = format!("{}_{index}", self.name);
            self.contexts.push(StaticContext::shared(&self.name, id));
        }
        self
    }

    /// Make `start_streaming` fail for `id`.
    pub fn fail_start_on(mut self, id: impl Into<TradeId>) -> Self {
        self.fail_start.insert(id.into());
        self
    }

    /// Make `stop_streaming` fail for `id`.
    pub fn fail_stop_on(mut self, id: impl Into<TradeId>) -> Self {
        self.fail_stop.insert(id.into());
        self
    }

    /// Number of `start_streaming` calls, failed ones included.
    pub fn start_count(&self) -> usize {
        self.start_count.load(Ordering::SeqCst)
    }

    /// Number of `stop_streaming` calls, failed ones included.
    pub fn stop_count(&self) -> usize {
        self.stop_count.load(Ordering::SeqCst)
    }

    /// Contexts whose stream is currently open.
    pub fn open_streams(&self) -> usize {
        self.open.lock().len()
    }

    pub fn is_initialized(&self) -> bool {
        self.handler.lock().is_some()
    }

    /// Deliver an update for context `id` through the installed handler,
    /// the way a connector's reader task would.
    ///
    /// Returns `false` when the venue is not initialized or `id` is unknown.
    pub async fn push_update(&self, id: &TradeId) -> bool {
        let handler = self.handler.lock().clone();
        let context = self.contexts.iter().find(|c| &c.id() == id).cloned();
        match (handler, context) {
            (Some(handler), Some(context)) => {
                handler.on_update(context).await;
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl Venue for ScriptedVenue {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&self, handler: Arc<dyn StreamingHandler>) {
        *self.handler.lock() = Some(handler);
    }

    fn trade_contexts(&self) -> TradeContextCursor<'_> {
        Box::new(self.contexts.iter().cloned())
    }

    async fn start_streaming(&self, context: &Arc<dyn TradeContext>) -> Result<()> {
        self.start_count.fetch_add(1, Ordering::SeqCst);
        let id = context.id();
        if self.fail_start.contains(&id) {
            return Err(Error::Venue(format!("scripted start failure for {id}")));
        }
        self.open.lock().insert(id);
        Ok(())
    }

    async fn stop_streaming(&self, context: &Arc<dyn TradeContext>) -> Result<()> {
        self.stop_count.fetch_add(1, Ordering::SeqCst);
        let id = context.id();
        self.open.lock().remove(&id);
        if self.fail_stop.contains(&id) {
            return Err(Error::Venue(format!("scripted stop failure for {id}")));
        }
        Ok(())
    }
}
