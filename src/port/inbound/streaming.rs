//! Streaming update callback.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::TradeContext;

/// Callback a venue connector invokes from its own delivery task whenever
/// new market or trade data for a context has arrived.
///
/// Handlers never report failure back to the connector; whatever goes wrong
/// downstream is logged and the connector keeps delivering.
#[async_trait]
pub trait StreamingHandler: Send + Sync {
    async fn on_update(&self, context: Arc<dyn TradeContext>);
}
