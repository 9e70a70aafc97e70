//! Control-plane routes.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::state::{RuntimeStatus, StatusSnapshot};

/// Build the control-plane router.
///
/// `get` also answers `HEAD` requests, with the body stripped. A request
/// running longer than `timeout` is answered with `408`.
pub fn router(status: Arc<RuntimeStatus>, debug: bool, timeout: Duration) -> Router {
    with_layers(Router::new().route("/", get(index)), debug, timeout).with_state(status)
}

fn with_layers<S>(router: Router<S>, debug: bool, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let router = router.layer(TimeoutLayer::new(timeout));
    if debug {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

async fn index(State(status): State<Arc<RuntimeStatus>>) -> Json<StatusSnapshot> {
    Json(status.snapshot())
}
