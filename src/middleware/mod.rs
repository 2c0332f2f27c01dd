//! Middleware layer.
//!
//! Cross-cutting concerns that wrap every dispatch. Currently one:
//! [`trace`], a per-request span with method and path plus a completion
//! event carrying status and latency.

use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Runs `req` through `router` inside a `request` span.
pub(crate) async fn trace<S>(router: &Router<S>, req: Request) -> Response
where
    S: Clone + Send + Sync + 'static,
{
    let span = info_span!("request", method = %req.method(), path = %req.path());
    let started = Instant::now();

    async move {
        let response = router.handle(req).await;
        info!(
            status = response.status_code().code(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        response
    }
    .instrument(span)
    .await
}
