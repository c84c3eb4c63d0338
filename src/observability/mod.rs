//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → JSON lines
//! ```
//!
//! The same spans feed the `traceparent` header on outgoing requests, so a
//! backend that understands W3C trace context can join them up.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`exporter`]: span exporter and provider construction
//! - [`otlp`]: OTLP/JSON document types
//! - [`rotation`]: size-bounded trace file

mod exporter;
mod init;
mod otlp;
mod rotation;

pub use init::init_tracing;
