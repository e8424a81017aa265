//! Trace header middleware
//!
//! Every request runs inside a [`TraceContext`] kept in task-local storage, and
//! every response carries its identifiers in the `X-Trace-Id` and `X-Span-Id` headers.
//!
//! Task-local values are not inherited by spawned tasks; wrap spawned work in
//! [`TraceContext::scope`] to keep the identifiers visible.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::future::Future;
use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier
pub const TRACE_ID_HEADER: HeaderName = HeaderName::from_static("x-trace-id");

/// Response header carrying the span identifier
pub const SPAN_ID_HEADER: HeaderName = HeaderName::from_static("x-span-id");

task_local! {
    static TRACE_CONTEXT: TraceContext;
}

/// Trace and span identifiers of the request being handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    trace_id: String,
    span_id: String,
}

impl TraceContext {
    /// Fresh identifiers: 32 hex characters for the trace, 16 for the span
    pub fn generate() -> Self {
        Self {
            trace_id: Uuid::new_v4().simple().to_string(),
            span_id: new_span_id(),
        }
    }

    /// Continue the trace named by an inbound `X-Trace-Id`, or start a new one
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let inbound = headers
            .get(&TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| is_hex_id(id, 32));

        match inbound {
            Some(trace_id) => Self {
                trace_id: trace_id.to_ascii_lowercase(),
                span_id: new_span_id(),
            },
            None => Self::generate(),
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn span_id(&self) -> &str {
        &self.span_id
    }

    /// Returns the context of the current request, if one is in scope
    pub fn current() -> Option<Self> {
        TRACE_CONTEXT.try_with(|context| context.clone()).ok()
    }

    /// Run `fut` with this context in scope
    pub async fn scope<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_CONTEXT.scope(self, fut).await
    }
}

fn new_span_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(16);
    id
}

fn is_hex_id(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Trace header middleware
///
/// Puts a [`TraceContext`] in scope for the rest of the stack and copies it onto the response.
pub async fn trace_headers_middleware(request: Request, next: Next) -> Response {
    let context = TraceContext::from_headers(request.headers());
    let trace_id = HeaderValue::from_str(context.trace_id());
    let span_id = HeaderValue::from_str(context.span_id());

    let mut response = context.scope(next.run(request)).await;

    if let (Ok(trace_id), Ok(span_id)) = (trace_id, span_id) {
        let headers = response.headers_mut();
        headers.insert(TRACE_ID_HEADER, trace_id);
        headers.insert(SPAN_ID_HEADER, span_id);
    }

    response
}
