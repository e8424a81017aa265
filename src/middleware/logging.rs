//! Logging middleware
//!
//! Records HTTP request and response information

use super::trace::TraceContext;
use axum::{
    extract::Request,
    http::{HeaderMap, Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tracing::{info, warn, Instrument};

/// Requests slower than this are reported
const SLOW_REQUEST_THRESHOLD: Duration = Duration::from_secs(5);

/// Request logging middleware
///
/// Records each HTTP request inside an `http_request` span tagged with its trace identifier.
/// Must run inside [`super::trace::trace_headers_middleware`] for the identifier to be set.
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let trace_id = TraceContext::current()
        .map(|context| context.trace_id().to_string())
        .unwrap_or_default();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %method,
        path = %uri.path(),
        query = %uri.query().unwrap_or(""),
    );

    async move {
        info!(
            "Request started: {} {} - User-Agent: {}",
            method,
            uri,
            headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown")
        );

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let status = response.status();
        let millis = duration.as_secs_f64() * 1000.0;

        if status.is_client_error() {
            warn!("Client error: {} - Duration: {:.2}ms", status, millis);
        } else if status.is_server_error() {
            warn!("Server error: {} - Duration: {:.2}ms", status, millis);
        } else {
            info!("Request completed: {} - Duration: {:.2}ms", status, millis);
        }

        if duration > SLOW_REQUEST_THRESHOLD {
            warn!(
                "Slow request detected: {} {} - Duration: {:.2}s",
                method,
                uri,
                duration.as_secs_f64()
            );
        }

        response
    }
    .instrument(span)
    .await
}
