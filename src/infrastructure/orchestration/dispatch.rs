//! Streaming-update callback handed to every venue.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::TradeContext;
use crate::port::{StreamingHandler, TradeEngine};

/// Forwards venue updates to the trade engine.
///
/// Runs on the connectors' own tasks. Engine errors are logged and never
/// returned to the connector.
pub struct StreamingDispatcher {
    engine: Arc<dyn TradeEngine>,
}

impl StreamingDispatcher {
    pub fn new(engine: Arc<dyn TradeEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl StreamingHandler for StreamingDispatcher {
    async fn on_update(&self, context: Arc<dyn TradeContext>) {
        let id = context.id();
        if let Err(e) = self.engine.update(&id, &context).await {
            warn!(
                venue = %context.venue(),
                context = %id,
                error = %e,
                "Trade engine update failed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::engine::CountingTradeEngine;
    use crate::testkit::venue::StaticContext;

    #[tokio::test]
    async fn forwards_update_to_engine() {
        let engine = Arc::new(CountingTradeEngine::new());
        let dispatcher = StreamingDispatcher::new(engine.clone());
        let context = StaticContext::shared("alpha", "alpha_0");
        engine.create(&context.id(), &context).await.unwrap();

        dispatcher.on_update(Arc::clone(&context)).await;

        assert_eq!(engine.counts("alpha").updates, 1);
    }

    #[tokio::test]
    async fn engine_error_is_swallowed() {
        let engine = Arc::new(CountingTradeEngine::new().fail_updates());
        let dispatcher = StreamingDispatcher::new(engine.clone());

        dispatcher
            .on_update(StaticContext::shared("alpha", "alpha_0"))
            .await;

        assert_eq!(engine.total_updates(), 1);
    }
}
