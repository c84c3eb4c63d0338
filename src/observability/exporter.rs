//! File-backed OpenTelemetry span exporter.

use super::otlp::TracesData;
use super::rotation::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each export batch as one OTLP/JSON line.
#[derive(Debug)]
pub struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    scope: String,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    #[must_use]
    pub fn new(file: RotatingFile, resource: Resource, scope: impl Into<String>) -> Self {
        Self {
            file,
            resource,
            scope: scope.into(),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        let document = TracesData::from_batch(&self.resource, &self.scope, batch);
        let line = serde_json::to_string(&document).map_err(|e| TraceError::from(e.to_string()))?;
        self.file
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown.load(Ordering::SeqCst) {
            Err(TraceError::from("exporter is shut down"))
        } else {
            self.write_batch(&batch)
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider that exports every finished span synchronously.
///
/// Plugins run single-threaded in WASM, so there is no batch worker.
#[must_use]
pub fn create_tracer_provider(exporter: FileSpanExporter, resource: Resource) -> TracerProvider {
    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
