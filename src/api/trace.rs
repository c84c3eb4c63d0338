//! W3C trace-context propagation for outgoing requests.
//!
//! When a sampled OpenTelemetry span is active, every request carries a
//! `traceparent` header so backend spans can be stitched onto the plugin's
//! trace.

use opentelemetry::trace::TraceContextExt;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Trace and span identifiers captured from the current span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceParent {
    /// 32 lowercase hex digits.
    pub trace_id: String,
    /// 16 lowercase hex digits.
    pub span_id: String,
}

impl TraceParent {
    /// Captures the context of the current `tracing` span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// The `traceparent` header value (version 00, sampled).
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("00-{}-{}-01", self.trace_id, self.span_id)
    }
}
