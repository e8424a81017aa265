//! HTTP middleware module
//!
//! Request logging and trace header injection, composed around the handlers as `from_fn` layers

pub mod logging;
pub mod trace;

pub use logging::request_logging_middleware;
pub use trace::{trace_headers_middleware, TraceContext};
